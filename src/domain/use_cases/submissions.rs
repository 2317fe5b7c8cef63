use uuid::Uuid;

use crate::entities::{
    customization::{CustomizationCreated, CustomizationDraft, CustomizationInsert, CustomizationView},
    submission::{SubmissionDraft, SubmissionInsert, SubmissionView},
};
use crate::errors::AppError;
use crate::repositories::{
    media::{MediaPrefix, MediaStore},
    submission::SubmissionRepository,
};

pub struct SubmissionHandler<S, M>
where
    S: SubmissionRepository,
    M: MediaStore,
{
    pub submission_repo: S,
    pub media: M,
    pub auto_approve: bool,
}

impl<S, M> SubmissionHandler<S, M>
where
    S: SubmissionRepository,
    M: MediaStore,
{
    pub fn new(submission_repo: S, media: M, auto_approve: bool) -> Self {
        SubmissionHandler { submission_repo, media, auto_approve }
    }

    /// Anonymous drawings are stored with no owner.
    #[tracing::instrument(skip_all, fields(anonymous = user_id.is_none()))]
    pub async fn submit(&self, user_id: Option<Uuid>, draft: SubmissionDraft) -> Result<SubmissionView, AppError> {
        let image = self.media.save(MediaPrefix::UserSubmissions, &draft.image).await?;

        let insert = SubmissionInsert {
            name: draft.name,
            description: draft.description,
            image: image.clone(),
            user_id,
            is_approved: self.auto_approve,
        };

        match self.submission_repo.create_submission(&insert).await {
            Ok(row) => {
                tracing::info!(submission_id = row.submission.id, "Drawing submitted");
                Ok(row.into())
            }
            Err(e) => {
                self.discard(&image).await;
                Err(e)
            }
        }
    }

    pub async fn approved(&self) -> Result<Vec<SubmissionView>, AppError> {
        let rows = self.submission_repo.approved_submissions(None).await?;
        Ok(rows.into_iter().map(SubmissionView::from).collect())
    }

    pub async fn approve(&self, submission_id: i64) -> Result<SubmissionView, AppError> {
        let row = self.submission_repo.approve_submission(submission_id).await?;
        tracing::info!(submission_id, "Submission approved");
        Ok(row.into())
    }

    #[tracing::instrument(skip(self, draft))]
    pub async fn customize(&self, user_id: &Uuid, draft: CustomizationDraft) -> Result<CustomizationCreated, AppError> {
        let image = self.media.save(MediaPrefix::CustomizedPaintings, &draft.image).await?;

        let insert = CustomizationInsert {
            user_id: *user_id,
            title: draft.title,
            description: draft.description,
            style: draft.style,
            size: draft.size,
            frame: draft.frame,
            image: image.clone(),
        };

        match self.submission_repo.create_customization(&insert).await {
            Ok(painting) => Ok(CustomizationCreated::new(painting.id)),
            Err(e) => {
                self.discard(&image).await;
                Err(e)
            }
        }
    }

    pub async fn customization(&self, user_id: &Uuid, id: i64) -> Result<CustomizationView, AppError> {
        self.submission_repo
            .get_customization_for_user(id, user_id)
            .await?
            .map(CustomizationView::from)
            .ok_or_else(|| AppError::NotFound("Customization request not found".into()))
    }

    async fn discard(&self, key: &str) {
        if let Err(e) = self.media.remove(key).await {
            tracing::warn!(%key, "Failed to remove media file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::customization::{CanvasSize, CustomizedPainting, FrameStyle, PaintingStyle};
    use crate::entities::forms::ImageUpload;
    use crate::entities::submission::{SubmissionRow, UserSubmission};
    use crate::repositories::mocks::{MockMedia, MockSubmissionRepo};
    use chrono::Utc;

    fn upload() -> ImageUpload {
        ImageUpload::from_path("/tmp/drawing.png", Some("drawing.png"), Some("image/png"), 16)
    }

    fn row(insert: &SubmissionInsert, username: Option<&str>) -> SubmissionRow {
        SubmissionRow {
            submission: UserSubmission {
                id: 11,
                name: insert.name.clone(),
                description: insert.description.clone(),
                image: insert.image.clone(),
                user_id: insert.user_id,
                is_approved: insert.is_approved,
                created_at: Utc::now(),
            },
            username: username.map(str::to_string),
        }
    }

    fn saving_media(key: &'static str) -> MockMedia {
        let mut media = MockMedia::new();
        media
            .expect_save()
            .returning(move |prefix, _| Ok(format!("{}/{}", prefix.as_str(), key)));
        media
    }

    #[tokio::test]
    async fn anonymous_submission_is_pending_by_default() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create_submission()
            .withf(|s| s.user_id.is_none() && !s.is_approved && s.image == "user_submissions/a.png")
            .returning(|s| Ok(row(s, None)));

        let handler = SubmissionHandler::new(repo, saving_media("a.png"), false);
        let view = handler
            .submit(None, SubmissionDraft { name: "Cat".into(), description: "Crayon".into(), image: upload() })
            .await
            .unwrap();

        assert_eq!(view.artist, "Anonymous");
        assert!(!view.is_approved);
    }

    #[tokio::test]
    async fn auto_approve_setting_is_honoured() {
        let user = Uuid::new_v4();
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create_submission()
            .withf(move |s| s.user_id == Some(user) && s.is_approved)
            .returning(|s| Ok(row(s, Some("ravi"))));

        let handler = SubmissionHandler::new(repo, saving_media("b.png"), true);
        let view = handler
            .submit(Some(user), SubmissionDraft { name: "Sky".into(), description: "Ink".into(), image: upload() })
            .await
            .unwrap();

        assert_eq!(view.artist, "ravi");
        assert!(view.is_approved);
    }

    #[tokio::test]
    async fn failed_customization_insert_removes_image() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create_customization()
            .returning(|_| Err(AppError::InternalError("db down".into())));
        let mut media = saving_media("c.png");
        media
            .expect_remove()
            .withf(|key| key == "customized_paintings/c.png")
            .times(1)
            .returning(|_| Ok(()));

        let handler = SubmissionHandler::new(repo, media, false);
        let result = handler
            .customize(
                &Uuid::new_v4(),
                CustomizationDraft {
                    title: "Portrait".into(),
                    description: "Family".into(),
                    style: PaintingStyle::Oil,
                    size: CanvasSize::Large,
                    frame: FrameStyle::NoFrame,
                    image: upload(),
                },
            )
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn customization_is_created_with_redirect() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_create_customization().returning(|c| {
            Ok(CustomizedPainting {
                id: 5,
                user_id: c.user_id,
                title: c.title.clone(),
                description: c.description.clone(),
                style: c.style,
                size: c.size,
                frame: c.frame,
                image: c.image.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let handler = SubmissionHandler::new(repo, saving_media("d.png"), false);
        let created = handler
            .customize(
                &Uuid::new_v4(),
                CustomizationDraft {
                    title: "Harbour".into(),
                    description: "Evening".into(),
                    style: PaintingStyle::Watercolor,
                    size: CanvasSize::Small,
                    frame: FrameStyle::Classic,
                    image: upload(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(created.redirect_url, "/api/v1/customizations/5");
    }

    #[tokio::test]
    async fn someone_elses_customization_is_not_found() {
        let mut repo = MockSubmissionRepo::new();
        repo.expect_get_customization_for_user().returning(|_, _| Ok(None));

        let handler = SubmissionHandler::new(repo, MockMedia::new(), false);
        let result = handler.customization(&Uuid::new_v4(), 5).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
