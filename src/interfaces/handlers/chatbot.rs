use actix_web::{web, Either, HttpResponse};
use tracing::instrument;

use crate::{
    entities::chat::{ChatQuery, ChatResponse},
    handlers::json_or_form,
    AppState,
};

/// Store failures never leak: the client gets the canned error reply.
#[instrument(skip_all)]
pub async fn chatbot(
    state: web::Data<AppState>,
    body: Either<web::Json<ChatQuery>, web::Form<ChatQuery>>,
) -> HttpResponse {
    let query = json_or_form(body).query;

    match state.chat_handler.respond(&query).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Chat responder failed: {}", e);
            HttpResponse::InternalServerError().json(ChatResponse::error())
        }
    }
}
