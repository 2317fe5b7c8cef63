use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::{
        customization::{CustomizationInsert, CustomizedPainting},
        submission::{SubmissionInsert, SubmissionRow},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxSubmissionRepo,
};

const SUBMISSION_SELECT: &str = "SELECT s.id, s.name, s.description, s.image, s.user_id, s.is_approved, \
    s.created_at, u.username FROM user_submissions s LEFT JOIN users u ON u.id = s.user_id";

const CUSTOMIZATION_COLUMNS: &str =
    "id, user_id, title, description, style, size, frame, image, created_at, updated_at";

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create_submission(&self, submission: &SubmissionInsert) -> Result<SubmissionRow, AppError>;
    async fn approved_submissions(&self, limit: Option<i64>) -> Result<Vec<SubmissionRow>, AppError>;
    async fn approve_submission(&self, id: i64) -> Result<SubmissionRow, AppError>;
    async fn create_customization(&self, request: &CustomizationInsert) -> Result<CustomizedPainting, AppError>;
    async fn get_customization_for_user(&self, id: i64, user_id: &Uuid) -> Result<Option<CustomizedPainting>, AppError>;
}

impl SqlxSubmissionRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxSubmissionRepo { pool }
    }

    async fn get_submission(&self, id: i64) -> Result<Option<SubmissionRow>, AppError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!("{SUBMISSION_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }
}

#[async_trait]
impl SubmissionRepository for SqlxSubmissionRepo {
    async fn create_submission(&self, submission: &SubmissionInsert) -> Result<SubmissionRow, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO user_submissions (name, description, image, user_id, is_approved)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#
        )
        .bind(&submission.name)
        .bind(&submission.description)
        .bind(&submission.image)
        .bind(submission.user_id)
        .bind(submission.is_approved)
        .fetch_one(&self.pool)
        .await?;

        self.get_submission(id)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("Submission {id} vanished after insert")))
    }

    async fn approved_submissions(&self, limit: Option<i64>) -> Result<Vec<SubmissionRow>, AppError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "{SUBMISSION_SELECT} WHERE s.is_approved = TRUE ORDER BY s.created_at DESC, s.id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn approve_submission(&self, id: i64) -> Result<SubmissionRow, AppError> {
        let result = sqlx::query("UPDATE user_submissions SET is_approved = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Submission not found".into()));
        }

        self.get_submission(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".into()))
    }

    async fn create_customization(&self, request: &CustomizationInsert) -> Result<CustomizedPainting, AppError> {
        let created = sqlx::query_as::<_, CustomizedPainting>(&format!(
            "INSERT INTO customized_paintings (user_id, title, description, style, size, frame, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CUSTOMIZATION_COLUMNS}"
        ))
        .bind(request.user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.style)
        .bind(request.size)
        .bind(request.frame)
        .bind(&request.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_customization_for_user(
        &self,
        id: i64,
        user_id: &Uuid,
    ) -> Result<Option<CustomizedPainting>, AppError> {
        let painting = sqlx::query_as::<_, CustomizedPainting>(&format!(
            "SELECT {CUSTOMIZATION_COLUMNS} FROM customized_paintings WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(painting)
    }
}
