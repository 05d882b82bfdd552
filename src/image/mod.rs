//! Image payloads exchanged with the studio
//!
//! Holds the inline image type used for uploads and request attachments, the
//! generated result type, and loading of user-selected files.

pub mod inline;
pub mod upload;

pub use inline::{GeneratedImage, InlineImage, RESULT_MIME_TYPE};
pub use upload::load_upload;
