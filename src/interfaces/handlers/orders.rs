use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::order::{PlaceOrderForm, UpdateOrderStatusRequest},
    errors::AppError,
    handlers::OptionalBody,
    use_cases::extractors::{AdminClaims, AuthClaims},
    AppState,
};

/// Answers 303 See Other pointing at the confirmation resource.
#[instrument(skip_all)]
pub async fn place_order(
    claims: AuthClaims,
    state: web::Data<AppState>,
    body: OptionalBody<PlaceOrderForm>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let placed = state.order_handler.place_order(&user_id, body.into_inner()).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, placed.confirmation_url.clone()))
        .json(placed))
}

pub async fn order_history(claims: AuthClaims, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let orders = state.order_handler.order_history(&user_id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

pub async fn order_confirmation(
    claims: AuthClaims,
    state: web::Data<AppState>,
    order_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let confirmation = state.order_handler.confirmation(&user_id, order_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

#[instrument(skip(_claims, state, body))]
pub async fn update_order_status(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    order_id: web::Path<i64>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<impl Responder, AppError> {
    let order = state
        .order_handler
        .update_status(order_id.into_inner(), body.into_inner().status)
        .await?;
    Ok(HttpResponse::Ok().json(order))
}
