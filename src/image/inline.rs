use crate::{Error, Result};
use base64::Engine as _;

/// Media type assumed for every generated image. The response's own
/// `mimeType` hint is never consulted.
pub const RESULT_MIME_TYPE: &str = "image/png";

/// Raw image bytes with their declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::InputDecode("data URI must start with 'data:'".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::InputDecode("data URI has no ',' separator".to_string()))?;

        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| Error::InputDecode("data URI is not base64 encoded".to_string()))?;

        if mime_type.is_empty() {
            return Err(Error::InputDecode(
                "data URI does not declare a media type".to_string(),
            ));
        }

        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| Error::InputDecode(format!("Invalid base64 in data URI: {}", e)))?;

        Ok(Self::new(mime_type, data))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data())
    }

    pub fn base64_data(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// The single image extracted from a generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
}

impl GeneratedImage {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn mime_type(&self) -> &'static str {
        RESULT_MIME_TYPE
    }

    /// Displayable `data:image/png;base64,...` resource.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            RESULT_MIME_TYPE,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

impl From<GeneratedImage> for InlineImage {
    fn from(image: GeneratedImage) -> Self {
        InlineImage::new(RESULT_MIME_TYPE, image.data)
    }
}
