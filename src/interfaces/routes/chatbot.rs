use actix_web::web;

use crate::handlers::chatbot;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/chatbot")
            .route(web::post().to(chatbot::chatbot))
    );
}
