use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockBuilder};

pub(crate) const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

pub(crate) fn post_path_regex(regex: &str) -> MockBuilder {
    Mock::given(method("POST")).and(path_regex(regex))
}
