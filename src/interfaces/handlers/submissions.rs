use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{customization::CustomizationUpload, submission::SubmissionUpload},
    errors::AppError,
    use_cases::extractors::{AdminClaims, AuthClaims, MaybeClaims},
    AppState,
};

/// Anonymous callers may submit; the drawing is then stored without an owner.
#[instrument(skip_all)]
pub async fn submit_drawing(
    claims: MaybeClaims,
    state: web::Data<AppState>,
    form: MultipartForm<SubmissionUpload>,
) -> Result<impl Responder, AppError> {
    let draft = form.into_inner().into_draft()?;
    let view = state.submission_handler.submit(claims.user_id(), draft).await?;
    Ok(HttpResponse::Created().json(view))
}

pub async fn list_submissions(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let submissions = state.submission_handler.approved().await?;
    Ok(HttpResponse::Ok().json(submissions))
}

#[instrument(skip(_claims, state))]
pub async fn approve_submission(
    _claims: AdminClaims,
    submission_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let view = state.submission_handler.approve(submission_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[instrument(skip_all)]
pub async fn create_customization(
    claims: AuthClaims,
    state: web::Data<AppState>,
    form: MultipartForm<CustomizationUpload>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let draft = form.into_inner().into_draft()?;
    let created = state.submission_handler.customize(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(created))
}

pub async fn customization_detail(
    claims: AuthClaims,
    customization_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let view = state
        .submission_handler
        .customization(&user_id, customization_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(view))
}
