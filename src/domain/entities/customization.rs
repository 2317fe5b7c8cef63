use std::{fmt, str::FromStr};

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::forms::{FormErrors, ImageUpload};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "painting_style", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaintingStyle {
    Oil,
    Watercolor,
    Sketch,
    Popart,
    Impressionist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "canvas_size", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CanvasSize {
    Small,
    Medium,
    Large,
    Xlarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "frame_style", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[sqlx(rename = "none")]
    #[serde(rename = "none")]
    NoFrame,
    Classic,
    Modern,
    Vintage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice(pub String);

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown choice: {}", self.0)
    }
}

macro_rules! closed_choice {
    ($ty:ident { $($variant:ident => $value:literal, $label:literal;)+ }) => {
        impl $ty {
            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($value => Ok($ty::$variant),)+
                    other => Err(UnknownChoice(other.to_string())),
                }
            }
        }
    };
}

closed_choice!(PaintingStyle {
    Oil => "oil", "Oil Painting";
    Watercolor => "watercolor", "Watercolor";
    Sketch => "sketch", "Sketch";
    Popart => "popart", "Pop Art";
    Impressionist => "impressionist", "Impressionist";
});

closed_choice!(CanvasSize {
    Small => "small", "Small (12\" x 16\")";
    Medium => "medium", "Medium (16\" x 20\")";
    Large => "large", "Large (20\" x 24\")";
    Xlarge => "xlarge", "Extra Large (24\" x 36\")";
});

closed_choice!(FrameStyle {
    NoFrame => "none", "No Frame";
    Classic => "classic", "Classic Wood";
    Modern => "modern", "Modern Metal";
    Vintage => "vintage", "Vintage Gold";
});

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomizedPainting {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub style: PaintingStyle,
    pub size: CanvasSize,
    pub frame: FrameStyle,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CustomizationView {
    #[serde(flatten)]
    pub painting: CustomizedPainting,
    pub style_label: &'static str,
    pub size_label: &'static str,
    pub frame_label: &'static str,
}

impl From<CustomizedPainting> for CustomizationView {
    fn from(painting: CustomizedPainting) -> Self {
        CustomizationView {
            style_label: painting.style.label(),
            size_label: painting.size.label(),
            frame_label: painting.frame.label(),
            painting,
        }
    }
}

#[derive(Debug)]
pub struct CustomizationInsert {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub style: PaintingStyle,
    pub size: CanvasSize,
    pub frame: FrameStyle,
    pub image: String,
}

#[derive(Debug, MultipartForm)]
pub struct CustomizationUpload {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub style: Option<Text<String>>,
    pub size: Option<Text<String>>,
    pub frame: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug)]
pub struct CustomizationDraft {
    pub title: String,
    pub description: String,
    pub style: PaintingStyle,
    pub size: CanvasSize,
    pub frame: FrameStyle,
    pub image: ImageUpload,
}

impl CustomizationUpload {
    pub fn into_draft(self) -> Result<CustomizationDraft, AppError> {
        let mut errors = FormErrors::new();
        let title = errors.text("title", self.title);
        let description = errors.text("description", self.description);
        let style = errors.choice::<PaintingStyle>("style", self.style);
        let size = errors.choice::<CanvasSize>("size", self.size);
        let frame = errors.choice::<FrameStyle>("frame", self.frame);
        let image = errors.image("image", self.image);

        if title.as_deref().is_some_and(|t| t.chars().count() > 200) {
            errors.push("title", "Must be at most 200 characters");
        }

        match (title, description, style, size, frame, image) {
            (Some(title), Some(description), Some(style), Some(size), Some(frame), Some(image))
                if errors.is_empty() =>
            {
                Ok(CustomizationDraft { title, description, style, size, frame, image })
            }
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomizationCreated {
    pub success: bool,
    pub id: i64,
    pub redirect_url: String,
}

impl CustomizationCreated {
    pub fn new(id: i64) -> Self {
        CustomizationCreated {
            success: true,
            id,
            redirect_url: format!("/api/v1/customizations/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::forms::INVALID_CHOICE;
    use crate::errors::FieldError;

    #[test]
    fn choices_parse_their_closed_sets() {
        assert_eq!("Oil".parse::<PaintingStyle>(), Ok(PaintingStyle::Oil));
        assert_eq!("none".parse::<FrameStyle>(), Ok(FrameStyle::NoFrame));
        assert_eq!("xlarge".parse::<CanvasSize>().map(|s| s.label()), Ok("Extra Large (24\" x 36\")"));
        assert!("cubist".parse::<PaintingStyle>().is_err());
    }

    #[test]
    fn frame_none_serializes_as_none() {
        assert_eq!(serde_json::to_string(&FrameStyle::NoFrame).unwrap(), "\"none\"");
    }

    #[test]
    fn invalid_choices_and_missing_fields_are_both_reported() {
        let upload = CustomizationUpload {
            title: Some(Text("Family portrait".into())),
            description: Some(Text("Four people, golden hour".into())),
            style: Some(Text("cubist".into())),
            size: None,
            frame: Some(Text("modern".into())),
            image: None,
        };

        match upload.into_draft() {
            Err(AppError::ValidationError(details)) => assert_eq!(
                details,
                vec![
                    FieldError::new("style", INVALID_CHOICE),
                    FieldError::new("size", "This field is required"),
                    FieldError::new("image", "This field is required"),
                ]
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
