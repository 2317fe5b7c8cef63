use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        artist::ArtistUpload,
        pagination::PageQuery,
        product::{PaintingUpload, UpdateProductRequest},
    },
    errors::AppError,
    use_cases::extractors::AuthClaims,
    AppState,
};

pub async fn list_artists(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    let page = state.artist_handler.list(query.page.as_deref()).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn artist_detail(
    artist_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.artist_handler.profile(artist_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip_all)]
pub async fn create_artist(
    claims: AuthClaims,
    state: web::Data<AppState>,
    form: MultipartForm<ArtistUpload>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let draft = form.into_inner().into_draft()?;
    let artist = state.artist_handler.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(artist))
}

#[instrument(skip(claims, state, form))]
pub async fn update_artist(
    claims: AuthClaims,
    artist_id: web::Path<i64>,
    state: web::Data<AppState>,
    form: MultipartForm<ArtistUpload>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let patch = form.into_inner().into_patch()?;
    let artist = state
        .artist_handler
        .update(&user_id, artist_id.into_inner(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(artist))
}

#[instrument(skip(claims, state, form))]
pub async fn add_painting(
    claims: AuthClaims,
    artist_id: web::Path<i64>,
    state: web::Data<AppState>,
    form: MultipartForm<PaintingUpload>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let draft = form.into_inner().into_draft()?;
    let product = state
        .artist_handler
        .add_painting(&user_id, artist_id.into_inner(), draft)
        .await?;
    Ok(HttpResponse::Created().json(product))
}

#[instrument(skip(claims, state, data))]
pub async fn update_product(
    claims: AuthClaims,
    product_id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProductRequest>,
) -> Result<impl Responder, AppError> {
    let product = state
        .artist_handler
        .update_product(&claims.0, product_id.into_inner(), data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}
