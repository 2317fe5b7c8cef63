use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::forms::{FormErrors, ImageUpload};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub stock: i32,
    pub category_id: i64,
    pub artist_id: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Product joined with the names shown next to it in listings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductCard {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub artist_name: String,
    pub category_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

impl SortKey {
    /// Unknown or missing keys fall back to newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => SortKey::Oldest,
            Some("price_high") => SortKey::PriceHigh,
            Some("price_low") => SortKey::PriceLow,
            _ => SortKey::Newest,
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            SortKey::Newest => "p.created_at DESC, p.id DESC",
            SortKey::Oldest => "p.created_at ASC, p.id ASC",
            SortKey::PriceHigh => "p.price DESC, p.id DESC",
            SortKey::PriceLow => "p.price ASC, p.id ASC",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct PriceStats {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
}

#[derive(Debug)]
pub struct ProductInsert {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub stock: i32,
    pub category_id: i64,
    pub artist_id: i64,
}

#[derive(Debug, MultipartForm)]
pub struct PaintingUpload {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub category_id: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub stock: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug)]
pub struct PaintingDraft {
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub price: Decimal,
    pub stock: i32,
    pub image: ImageUpload,
}

impl PaintingUpload {
    /// Price and stock start at zero when the artist leaves them out.
    pub fn into_draft(self) -> Result<PaintingDraft, AppError> {
        let mut errors = FormErrors::new();
        let name = errors.text("name", self.name);
        let description = errors.text("description", self.description);
        let category_id = errors.id("category_id", self.category_id);
        let price = errors.decimal("price", self.price).unwrap_or(Decimal::ZERO);
        let stock = errors.count("stock", self.stock).unwrap_or(0);
        let image = errors.image("image", self.image);

        if name.as_deref().is_some_and(|n| n.chars().count() > 200) {
            errors.push("name", "Must be at most 200 characters");
        }

        match (name, description, category_id, image) {
            (Some(name), Some(description), Some(category_id), Some(image)) if errors.is_empty() => {
                Ok(PaintingDraft { name, description, category_id, price, stock, image })
            }
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Must be between 1 and 200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    #[validate(range(min = 1, message = "Invalid category"))]
    pub category_id: Option<i64>,

    pub is_featured: Option<bool>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
            && self.is_featured.is_none()
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.scale() > 2 {
        let mut err = ValidationError::new("invalid_price");
        err.message = Some("Price must be non-negative with at most two decimal places".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sort_key_defaults_to_newest() {
        assert_eq!(SortKey::parse(None), SortKey::Newest);
        assert_eq!(SortKey::parse(Some("relevance")), SortKey::Newest);
        assert_eq!(SortKey::parse(Some("price_low")), SortKey::PriceLow);
        assert_eq!(SortKey::parse(Some("oldest")).order_by(), "p.created_at ASC, p.id ASC");
    }

    #[test]
    fn update_request_rejects_bad_price_and_stock() {
        let request = UpdateProductRequest {
            price: Some(dec!(10.555)),
            stock: Some(-2),
            ..Default::default()
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn painting_without_price_defaults_to_zero() {
        let upload = PaintingUpload {
            name: Some(Text("Monsoon".into())),
            description: Some(Text("Rain study".into())),
            category_id: Some(Text("2".into())),
            price: None,
            stock: None,
            image: None,
        };

        match upload.into_draft() {
            Err(AppError::ValidationError(details)) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "image");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
