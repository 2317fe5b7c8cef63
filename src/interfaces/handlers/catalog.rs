use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{pagination::PageQuery, product::SearchParams},
    errors::AppError,
    AppState,
};

pub async fn list_categories(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let categories = state.catalog_handler.categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[instrument(skip(state, query))]
pub async fn category_detail(
    category_id: web::Path<i64>,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    let page = state
        .catalog_handler
        .category_detail(category_id.into_inner(), query.page.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn product_detail(
    product_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let product = state.catalog_handler.product_detail(product_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[instrument(skip_all, fields(q = ?params.q, sort = ?params.sort))]
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> Result<impl Responder, AppError> {
    let results = state.catalog_handler.search(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(results))
}
