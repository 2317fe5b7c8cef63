use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{cascade::CascadeRoot, category::CategoryUpload},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip_all)]
pub async fn create_category(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<CategoryUpload>,
) -> Result<impl Responder, AppError> {
    let draft = form.into_inner().into_draft()?;
    let category = state.admin_handler.create_category(draft).await?;
    Ok(HttpResponse::Created().json(category))
}

#[instrument(skip(_claims, state))]
pub async fn delete_category(
    _claims: AdminClaims,
    category_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state
        .admin_handler
        .delete(CascadeRoot::Category(category_id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(deleted))
}

#[instrument(skip(_claims, state))]
pub async fn delete_artist(
    _claims: AdminClaims,
    artist_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let deleted = state
        .admin_handler
        .delete(CascadeRoot::Artist(artist_id.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(deleted))
}
