use actix_web::web;

use crate::handlers::{admin, orders, submissions, system::health_check};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(health_check)
            .service(
                web::resource("/categories")
                    .route(web::post().to(admin::create_category))
            )
            .service(
                web::resource("/categories/{category_id}")
                    .route(web::delete().to(admin::delete_category))
            )
            .service(
                web::resource("/artists/{artist_id}")
                    .route(web::delete().to(admin::delete_artist))
            )
            .service(
                web::resource("/orders/{order_id}/status")
                    .route(web::patch().to(orders::update_order_status))
            )
            .service(
                web::resource("/submissions/{submission_id}/approve")
                    .route(web::patch().to(submissions::approve_submission))
            )
    );
}
