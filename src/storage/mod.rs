//! Filesystem media store.
//!
//! Uploaded objects are written under the media directory and served back
//! at `{public_base_url}/media/{path}`.

use std::path::{Component, Path, PathBuf};

use chrono::Utc;

use crate::errors::AppError;

/// Upper bound for a single image upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap for uploads. Kept above [`MAX_IMAGE_BYTES`] so that
/// slightly oversized images reach validation and get a proper error.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Route prefix the media directory is mounted under.
pub const MEDIA_ROUTE: &str = "/media";

/// Writes objects to disk and hands out their public URLs.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes` at the relative `object_path` and return its public URL.
    pub async fn upload(&self, object_path: &str, bytes: &[u8]) -> Result<String, AppError> {
        let relative = sanitize_object_path(object_path)?;
        let full_path = self.root.join(&relative);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, bytes).await?;

        tracing::info!("Stored {} bytes at {}", bytes.len(), full_path.display());
        Ok(self.public_url(object_path))
    }

    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url,
            MEDIA_ROUTE,
            object_path.trim_start_matches('/')
        )
    }
}

/// Validate an uploaded slide image and pick its object path
/// (`slides/slide-<millis>.<ext>`).
pub fn slide_image_path(
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
) -> Result<String, AppError> {
    if !content_type.is_some_and(|ct| ct.starts_with("image/")) {
        return Err(AppError::Validation(
            "Please select a valid image".to_string(),
        ));
    }
    if size == 0 {
        return Err(AppError::Validation("Image is empty".to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AppError::Validation(
            "Image too large (maximum 10MB)".to_string(),
        ));
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    Ok(format!(
        "slides/slide-{}.{}",
        Utc::now().timestamp_millis(),
        extension
    ))
}

/// Reject absolute paths and parent-directory components.
fn sanitize_object_path(object_path: &str) -> Result<PathBuf, AppError> {
    let path = Path::new(object_path);
    let clean = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !clean || object_path.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Invalid object path: {}",
            object_path
        )));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_slide_image_path() {
        let path = slide_image_path("Festa.JPG", Some("image/jpeg"), 1024).unwrap();
        assert!(path.starts_with("slides/slide-"));
        assert!(path.ends_with(".jpg"));

        let no_ext = slide_image_path("photo", Some("image/png"), 10).unwrap();
        assert!(no_ext.ends_with(".bin"));
    }

    #[test]
    fn test_slide_image_validation() {
        assert!(matches!(
            slide_image_path("doc.pdf", Some("application/pdf"), 10),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            slide_image_path("a.png", None, 10),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            slide_image_path("a.png", Some("image/png"), MAX_IMAGE_BYTES + 1),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_sanitize_object_path() {
        assert!(sanitize_object_path("slides/a.png").is_ok());
        assert!(sanitize_object_path("../etc/passwd").is_err());
        assert!(sanitize_object_path("/abs.png").is_err());
        assert!(sanitize_object_path("").is_err());
    }

    #[tokio::test]
    async fn test_upload_writes_file() {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path(), "http://localhost:8080/");

        let url = store.upload("slides/x.png", b"png-bytes").await.unwrap();
        assert_eq!(url, "http://localhost:8080/media/slides/x.png");

        let written = tokio::fs::read(dir.path().join("slides/x.png")).await.unwrap();
        assert_eq!(written, b"png-bytes");
    }
}
