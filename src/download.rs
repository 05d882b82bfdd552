//! Saving generated images to disk.

use crate::image::GeneratedImage;
use crate::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const DOWNLOAD_PREFIX: &str = "francolino-ai-";

/// `francolino-ai-<unix millis>.png`
pub fn download_filename(at: DateTime<Utc>) -> String {
    format!("{}{}.png", DOWNLOAD_PREFIX, at.timestamp_millis())
}

/// Write `image` into `dir`, creating the directory when needed.
pub async fn save_image(image: &GeneratedImage, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(download_filename(Utc::now()));
    tokio::fs::write(&path, &image.data).await?;

    tracing::info!(
        "Saved generated image ({} bytes) to {}",
        image.data.len(),
        path.display()
    );
    Ok(path)
}
