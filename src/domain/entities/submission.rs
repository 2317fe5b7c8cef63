use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::forms::{FormErrors, ImageUpload};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSubmission {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub user_id: Option<Uuid>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Submission joined with its author's username.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    #[sqlx(flatten)]
    pub submission: UserSubmission,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub artist: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for SubmissionView {
    fn from(row: SubmissionRow) -> Self {
        let SubmissionRow { submission, username } = row;
        SubmissionView {
            id: submission.id,
            name: submission.name,
            description: submission.description,
            image: submission.image,
            artist: username.unwrap_or_else(|| "Anonymous".to_string()),
            is_approved: submission.is_approved,
            created_at: submission.created_at,
        }
    }
}

#[derive(Debug)]
pub struct SubmissionInsert {
    pub name: String,
    pub description: String,
    pub image: String,
    pub user_id: Option<Uuid>,
    pub is_approved: bool,
}

#[derive(Debug, MultipartForm)]
pub struct SubmissionUpload {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub image: Option<TempFile>,
}

#[derive(Debug)]
pub struct SubmissionDraft {
    pub name: String,
    pub description: String,
    pub image: ImageUpload,
}

impl SubmissionUpload {
    pub fn into_draft(self) -> Result<SubmissionDraft, AppError> {
        let mut errors = FormErrors::new();
        let name = errors.text("name", self.name);
        let description = errors.text("description", self.description);
        let image = errors.image("image", self.image);

        if name.as_deref().is_some_and(|n| n.chars().count() > 200) {
            errors.push("name", "Must be at most 200 characters");
        }

        match (name, description, image) {
            (Some(name), Some(description), Some(image)) if errors.is_empty() => {
                Ok(SubmissionDraft { name, description, image })
            }
            _ => Err(errors.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: Option<&str>) -> SubmissionRow {
        SubmissionRow {
            submission: UserSubmission {
                id: 1,
                name: "Kite".into(),
                description: "Crayon".into(),
                image: "user_submissions/kite.png".into(),
                user_id: None,
                is_approved: false,
                created_at: Utc::now(),
            },
            username: username.map(String::from),
        }
    }

    #[test]
    fn anonymous_submissions_are_labelled() {
        assert_eq!(SubmissionView::from(row(None)).artist, "Anonymous");
        assert_eq!(SubmissionView::from(row(Some("mira"))).artist, "mira");
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let upload = SubmissionUpload { name: None, description: None, image: None };
        match upload.into_draft() {
            Err(AppError::ValidationError(details)) => assert_eq!(details.len(), 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
