use actix_web::web;

use crate::handlers::submissions;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/submissions")
            .route(web::get().to(submissions::list_submissions))
            .route(web::post().to(submissions::submit_drawing))
    )
    .service(
        web::scope("/customizations")
            .service(
                web::resource("")
                    .route(web::post().to(submissions::create_customization))
            )
            .service(
                web::resource("/{customization_id}")
                    .route(web::get().to(submissions::customization_detail))
            )
    );
}
