use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod artists;
mod auth;
mod cart;
mod catalog;
mod chatbot;
mod json_error;
mod orders;
mod submissions;

/// `max_upload_bytes` caps each multipart request.
pub fn configure_routes(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(catalog::config_routes)
            .configure(artists::config_routes)
            .configure(cart::config_routes)
            .configure(orders::config_routes)
            .configure(submissions::config_routes)
            .configure(chatbot::config_routes)
            .configure(admin::config_routes)
    );

    json_error::config_routes(cfg, max_upload_bytes);
}
