use actix_web::web;

use crate::handlers::{artists, catalog};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .service(
                web::resource("")
                    .route(web::get().to(catalog::list_categories))
            )
            .service(
                web::resource("/{category_id}")
                    .route(web::get().to(catalog::category_detail))
            )
    )
    .service(
        web::resource("/products/{product_id}")
            .route(web::get().to(catalog::product_detail))
            .route(web::patch().to(artists::update_product))
    )
    .service(
        web::resource("/search")
            .route(web::get().to(catalog::search))
    );
}
