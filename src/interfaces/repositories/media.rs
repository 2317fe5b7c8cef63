use std::fmt;

use async_trait::async_trait;

use crate::{entities::forms::ImageUpload, errors::AppError};

/// Upload prefixes inside the media store, one per kind of image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPrefix {
    CategoryImages,
    Products,
    Artists,
    UserSubmissions,
    CustomizedPaintings,
}

impl MediaPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaPrefix::CategoryImages => "category_images",
            MediaPrefix::Products => "products",
            MediaPrefix::Artists => "artists",
            MediaPrefix::UserSubmissions => "user_submissions",
            MediaPrefix::CustomizedPaintings => "customized_paintings",
        }
    }
}

impl fmt::Display for MediaPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persists the upload under `prefix` and returns its storage key,
    /// e.g. `products/<uuid>.png`.
    async fn save(&self, prefix: MediaPrefix, upload: &ImageUpload) -> Result<String, AppError>;

    /// Missing files are not an error.
    async fn remove(&self, key: &str) -> Result<(), AppError>;
}
