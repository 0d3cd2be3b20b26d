//! Upload Storage
//!
//! 上传图片的平铺目录。文件名形如 `{uuid}_{原文件名}`，预览用的临时文件为
//! `temp_{uuid}_{原文件名}`，用完即删。

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Prefix for classify-only uploads
const TEMP_PREFIX: &str = "temp_";

/// Name used when sanitizing leaves nothing
const FALLBACK_NAME: &str = "upload";

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name inside the upload directory (also the public URL segment)
    pub filename: String,
    pub path: PathBuf,
}

/// Flat directory of uploaded images
#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
}

impl UploadStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if missing
    pub async fn ensure_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create upload directory {}: {}",
                self.dir.display(),
                e
            ))
        })
    }

    /// Persist an upload that backs a report
    pub async fn save(&self, original_name: &str, data: &[u8]) -> AppResult<StoredFile> {
        self.write(stored_name(original_name), data).await
    }

    /// Persist an upload that is deleted after classification
    pub async fn save_temp(&self, original_name: &str, data: &[u8]) -> AppResult<StoredFile> {
        let filename = format!("{}{}", TEMP_PREFIX, stored_name(original_name));
        self.write(filename, data).await
    }

    async fn write(&self, filename: String, data: &[u8]) -> AppResult<StoredFile> {
        let path = self.dir.join(&filename);
        fs::write(&path, data)
            .await
            .map_err(|e| AppError::storage(format!("Failed to save file {}: {}", filename, e)))?;

        tracing::debug!(filename = %filename, size = data.len(), "Upload stored");
        Ok(StoredFile { filename, path })
    }

    /// Best-effort delete; failures are only logged
    pub async fn remove(&self, file: &StoredFile) -> bool {
        match fs::remove_file(&file.path).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(filename = %file.filename, error = %e, "Failed to delete upload");
                false
            }
        }
    }

    /// Read a stored upload for serving
    pub async fn read(&self, filename: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(filename)?;
        fs::read(&path).await.map_err(|e| {
            tracing::debug!(filename = %filename, error = %e, "Upload not readable");
            AppError::new(ErrorCode::FileNotFound)
        })
    }

    /// Path of a stored upload, rejecting anything that is not a plain filename
    pub fn resolve(&self, filename: &str) -> AppResult<PathBuf> {
        if !is_plain_filename(filename) {
            return Err(AppError::new(ErrorCode::InvalidFilename));
        }
        Ok(self.dir.join(filename))
    }
}

/// Collision-resistant stored name keeping the original name as a suffix
pub fn stored_name(original_name: &str) -> String {
    format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(original_name))
}

/// Reduce a client-supplied filename to a safe single path segment
///
/// Directory parts are dropped and characters outside `[A-Za-z0-9._-]`
/// become `_`.
pub fn sanitize_filename(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A single path segment that is neither `.` nor `..`
fn is_plain_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !matches!(filename, "." | "..")
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("pothole.jpg"), "pothole.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\road 1.png"), "road_1.png");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("dir/"), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename("my..photo.jpg"), "my..photo.jpg");
    }

    #[test]
    fn test_stored_name_unique_and_suffixed() {
        let a = stored_name("pothole.jpg");
        let b = stored_name("pothole.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("_pothole.jpg"));
        assert_eq!(a.len(), 32 + 1 + "pothole.jpg".len());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let storage = UploadStorage::new("uploads");
        assert!(storage.resolve("a_pothole.jpg").is_ok());
        assert!(storage.resolve("a_my..photo.jpg").is_ok());
        for bad in ["", ".", "..", "../secret", "a/b.jpg", "a\\b.jpg", "a\0.jpg"] {
            let err = storage.resolve(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFilename);
        }
    }

    #[tokio::test]
    async fn test_save_read_remove() {
        let dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(dir.path().join("uploads"));
        storage.ensure_dir().await.unwrap();

        let stored = storage.save("pothole.jpg", b"jpeg-bytes").await.unwrap();
        assert!(stored.filename.ends_with("_pothole.jpg"));
        assert_eq!(storage.read(&stored.filename).await.unwrap(), b"jpeg-bytes");

        assert!(storage.remove(&stored).await);
        let err = storage.read(&stored.filename).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);

        // Second removal fails quietly
        assert!(!storage.remove(&stored).await);
    }

    #[tokio::test]
    async fn test_double_dot_name_readable() {
        let dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(dir.path());

        let stored = storage.save("my..photo.jpg", b"jpeg").await.unwrap();
        assert!(stored.filename.ends_with("_my..photo.jpg"));
        assert_eq!(storage.read(&stored.filename).await.unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn test_save_temp_prefix() {
        let dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(dir.path());

        let stored = storage.save_temp("test.png", b"png").await.unwrap();
        assert!(stored.filename.starts_with("temp_"));
        assert!(stored.filename.ends_with("_test.png"));
        assert!(stored.path.exists());
    }

    #[tokio::test]
    async fn test_save_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let storage = UploadStorage::new(dir.path().join("not-created"));

        let err = storage.save("a.jpg", b"x").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FileStorageFailed);
    }
}
