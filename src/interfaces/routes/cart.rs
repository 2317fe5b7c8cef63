use actix_web::web;

use crate::handlers::cart;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .service(
                web::resource("")
                    .route(web::get().to(cart::view_cart))
            )
            .service(
                web::resource("/add/{product_id}")
                    .route(web::get().to(cart::add_to_cart))
                    .route(web::post().to(cart::add_to_cart))
            )
            .service(
                web::resource("/update/{product_id}")
                    .route(web::post().to(cart::update_cart))
            )
            .service(
                web::resource("/remove/{product_id}")
                    .route(web::get().to(cart::remove_from_cart))
                    .route(web::post().to(cart::remove_from_cart))
            )
    )
    .service(
        web::resource("/checkout")
            .route(web::get().to(cart::checkout))
    );
}
