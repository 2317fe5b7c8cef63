use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::Serialize;

use super::forms::{FormErrors, ImageUpload};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
}

/// A category row with its catalog counts, as the chat responder lists it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryStats {
    pub id: i64,
    pub name: String,
    pub product_count: i64,
    pub artist_count: i64,
}

#[derive(Debug)]
pub struct CategoryInsert {
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, MultipartForm)]
pub struct CategoryUpload {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub image: ImageUpload,
}

impl CategoryUpload {
    pub fn into_draft(self) -> Result<CategoryDraft, AppError> {
        let mut errors = FormErrors::new();
        let name = errors.text("name", self.name);
        let description = errors.text("description", self.description);
        let image = errors.image("image", self.image);

        match (name, description, image) {
            (Some(name), Some(description), Some(image)) if errors.is_empty() => {
                if name.chars().count() > 100 {
                    return Err(AppError::InvalidInput("Category name must be at most 100 characters".into()));
                }
                Ok(CategoryDraft { name, description, image })
            }
            _ => Err(errors.into()),
        }
    }
}
