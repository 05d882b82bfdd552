use super::InlineImage;
use crate::{Error, Result};
use std::path::Path;

/// Sniff the format of `bytes` and confirm they decode as an image.
///
/// Returns the media type derived from the content; file extensions and
/// declared types are ignored.
pub fn sniff_image(bytes: &[u8]) -> Result<&'static str> {
    if bytes.is_empty() {
        return Err(Error::InputDecode("file is empty".to_string()));
    }

    let format = image::guess_format(bytes)
        .map_err(|e| Error::InputDecode(format!("Unrecognized image format: {}", e)))?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::InputDecode(format!("Failed to decode image: {}", e)))?;

    Ok(format.to_mime_type())
}

/// Read a user-selected file into an [`InlineImage`].
pub async fn load_upload(path: &Path) -> Result<InlineImage> {
    let bytes = tokio::fs::read(path).await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let (bytes, mime_type) = tokio::task::spawn_blocking(move || {
        let mime_type = sniff_image(&bytes)?;
        Ok::<_, Error>((bytes, mime_type))
    })
    .await
    .map_err(|e| Error::Invariant(format!("Image decoding task join error: {}", e)))??;

    tracing::info!("Loaded {} upload from {}", mime_type, path.display());
    Ok(InlineImage::new(mime_type, bytes))
}
