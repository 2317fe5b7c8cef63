use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::{entities::cart::CartActionResponse, errors::AppError};

pub fn json_error(status: StatusCode, error: &str, details: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": error,
        "details": details
    }))
}

/// Cart endpoints answer failures with `{success: false, message}` and the
/// status of the underlying error. Server faults keep the generic envelope.
pub fn cart_action_response(result: Result<CartActionResponse, AppError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e @ AppError::InternalError(_)) => e.error_response(),
        Err(e) => {
            let message = match &e {
                AppError::Cart(err) => err.to_string(),
                AppError::NotFound(msg) => msg.clone(),
                other => other.to_string(),
            };
            HttpResponse::build(e.status_code()).json(CartActionResponse::failed(message))
        }
    }
}
