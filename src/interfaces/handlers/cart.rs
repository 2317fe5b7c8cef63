use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::cart::UpdateQuantity,
    errors::AppError,
    handlers::{json_error::cart_action_response, OptionalBody},
    use_cases::extractors::AuthClaims,
    AppState,
};

pub async fn view_cart(claims: AuthClaims, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let summary = state.cart_handler.view(&user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[instrument(skip(claims, state))]
pub async fn add_to_cart(
    claims: AuthClaims,
    state: web::Data<AppState>,
    product_id: web::Path<i64>,
) -> HttpResponse {
    let product_id = product_id.into_inner();
    let result = async {
        let user_id = claims.user_id()?;
        state.cart_handler.add(&user_id, product_id).await
    }
    .await;
    cart_action_response(result)
}

#[instrument(skip(claims, state, body))]
pub async fn update_cart(
    claims: AuthClaims,
    state: web::Data<AppState>,
    product_id: web::Path<i64>,
    body: OptionalBody<UpdateQuantity>,
) -> HttpResponse {
    let product_id = product_id.into_inner();
    let quantity = body.into_inner().quantity;
    let result = async {
        let user_id = claims.user_id()?;
        state.cart_handler.update(&user_id, product_id, quantity).await
    }
    .await;
    cart_action_response(result)
}

#[instrument(skip(claims, state))]
pub async fn remove_from_cart(
    claims: AuthClaims,
    state: web::Data<AppState>,
    product_id: web::Path<i64>,
) -> HttpResponse {
    let product_id = product_id.into_inner();
    let result = async {
        let user_id = claims.user_id()?;
        state.cart_handler.remove(&user_id, product_id).await
    }
    .await;
    cart_action_response(result)
}

pub async fn checkout(claims: AuthClaims, state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let user_id = claims.user_id()?;
    let summary = state.cart_handler.checkout(&user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}
