use actix_web::{get, web, HttpResponse, Responder};

use crate::{errors::AppError, AppState};

/// Storefront landing data: a few categories, featured products and
/// artists, and the latest approved drawings.
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let page = state.catalog_handler.home().await?;
    Ok(HttpResponse::Ok().json(page))
}
