use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::{
    entities::forms::ImageUpload,
    errors::AppError,
    repositories::media::{MediaPrefix, MediaStore},
};

/// Media store rooted at a local directory. Keys are relative paths such
/// as `artists/<uuid>.jpg`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalMediaStore { root: root.into() }
    }

    /// Resolves a key below the root; anything that would escape it is
    /// rejected.
    fn resolve(&self, key: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !safe || key.is_empty() {
            return Err(AppError::InvalidInput(format!("Invalid media key: {key}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, prefix: MediaPrefix, upload: &ImageUpload) -> Result<String, AppError> {
        let key = format!("{}/{}.{}", prefix, Uuid::new_v4(), upload.extension());
        let destination = self.resolve(&key)?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::InternalError(format!("Failed to create media directory: {e}"))
            })?;
        }

        // copy rather than rename: the temp dir may sit on another filesystem
        fs::copy(&upload.path, &destination)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::debug!(%key, size = upload.size, "Stored media file");
        Ok(key)
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::InternalError(format!("Failed to remove {key}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("media-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn save_places_file_under_prefix() {
        let root = temp_root();
        let store = LocalMediaStore::new(&root);

        let source = std::env::temp_dir().join(format!("src-{}.png", Uuid::new_v4()));
        std::fs::write(&source, b"not really a png").unwrap();
        let upload = ImageUpload::from_path(&source, Some("sunset.PNG"), Some("image/png"), 16);

        let key = store.save(MediaPrefix::Products, &upload).await.unwrap();
        assert!(key.starts_with("products/"));
        assert!(key.ends_with(".png"));
        assert_eq!(std::fs::read(root.join(&key)).unwrap(), b"not really a png");

        store.remove(&key).await.unwrap();
        store.remove(&key).await.unwrap();
        assert!(!root.join(&key).exists());

        std::fs::remove_file(source).ok();
        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_root() {
        let store = LocalMediaStore::new(temp_root());
        assert!(store.remove("../etc/passwd").await.is_err());
        assert!(store.remove("/etc/passwd").await.is_err());
    }
}
