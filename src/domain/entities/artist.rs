use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::forms::{optional_text, FormErrors, ImageUpload};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub profession: String,
    pub bio: String,
    pub profile_picture: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Artist {
    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.user_id == *user_id
    }
}

/// Artist row plus the number of paintings listed under it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub profession: String,
    pub profile_picture: Option<String>,
    pub paintings_count: i64,
}

#[derive(Debug)]
pub struct ArtistInsert {
    pub user_id: Uuid,
    pub name: String,
    pub profession: String,
    pub bio: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Default)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
}

impl ArtistChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.profession.is_none()
            && self.bio.is_none()
            && self.profile_picture.is_none()
    }
}

#[derive(Debug, MultipartForm)]
pub struct ArtistUpload {
    pub name: Option<Text<String>>,
    pub profession: Option<Text<String>>,
    pub bio: Option<Text<String>>,
    pub profile_picture: Option<TempFile>,
}

#[derive(Debug)]
pub struct ArtistDraft {
    pub name: String,
    pub profession: String,
    pub bio: String,
    pub profile_picture: Option<ImageUpload>,
}

#[derive(Debug, Default)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub profession: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<ImageUpload>,
}

impl ArtistUpload {
    pub fn into_draft(self) -> Result<ArtistDraft, AppError> {
        let mut errors = FormErrors::new();
        let name = errors.text("name", self.name);
        let profession = errors.text("profession", self.profession);
        let bio = errors.text("bio", self.bio);
        let profile_picture = errors.optional_image("profile_picture", self.profile_picture);
        check_lengths(&mut errors, name.as_deref(), profession.as_deref());

        match (name, profession, bio) {
            (Some(name), Some(profession), Some(bio)) if errors.is_empty() => Ok(ArtistDraft {
                name,
                profession,
                bio,
                profile_picture,
            }),
            _ => Err(errors.into()),
        }
    }

    /// Every field is optional on update; supplied ones are still checked.
    pub fn into_patch(self) -> Result<ArtistPatch, AppError> {
        let mut errors = FormErrors::new();
        let patch = ArtistPatch {
            name: optional_text(self.name),
            profession: optional_text(self.profession),
            bio: optional_text(self.bio),
            profile_picture: errors.optional_image("profile_picture", self.profile_picture),
        };
        check_lengths(&mut errors, patch.name.as_deref(), patch.profession.as_deref());

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors.into())
        }
    }
}

fn check_lengths(errors: &mut FormErrors, name: Option<&str>, profession: Option<&str>) {
    if name.is_some_and(|n| n.chars().count() > 100) {
        errors.push("name", "Must be at most 100 characters");
    }
    if profession.is_some_and(|p| p.chars().count() > 100) {
        errors.push("profession", "Must be at most 100 characters");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldError;

    #[test]
    fn draft_reports_every_missing_field() {
        let upload = ArtistUpload {
            name: Some(Text("Mira".into())),
            profession: None,
            bio: None,
            profile_picture: None,
        };

        match upload.into_draft() {
            Err(AppError::ValidationError(details)) => {
                let fields: Vec<_> = details.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["profession", "bio"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn patch_accepts_partial_input() {
        let upload = ArtistUpload {
            name: None,
            profession: Some(Text("Muralist".into())),
            bio: Some(Text(" ".into())),
            profile_picture: None,
        };

        let patch = upload.into_patch().unwrap();
        assert_eq!(patch.profession.as_deref(), Some("Muralist"));
        assert!(patch.bio.is_none());
    }

    #[test]
    fn overlong_name_is_rejected() {
        let upload = ArtistUpload {
            name: Some(Text("x".repeat(101))),
            profession: Some(Text("Painter".into())),
            bio: Some(Text("Bio".into())),
            profile_picture: None,
        };

        match upload.into_draft() {
            Err(AppError::ValidationError(details)) => {
                assert_eq!(details, vec![FieldError::new("name", "Must be at most 100 characters")]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
