#[cfg(test)]
#[path = "image_test.rs"]
mod tests;

use std::fmt;
use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A photo picked by the user, kept as the raw uploaded bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish();
    }
}

impl ImageUpload {
    pub async fn from_path(file_path: &path::Path) -> Result<ImageUpload> {
        let extension = file_path
            .extension()
            .map(|e| return e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !SUPPORTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            bail!(format!(
                "{} is not a supported image. Upload one of: {}",
                file_path.display(),
                SUPPORTED_IMAGE_EXTENSIONS.join(", ")
            ));
        }

        if !file_path.exists() {
            bail!(format!("No image found at {}", file_path.display()));
        }

        let bytes = fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_default();

        return Ok(ImageUpload { file_name, bytes });
    }
}
