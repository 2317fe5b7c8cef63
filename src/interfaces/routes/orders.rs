use actix_web::web;

use crate::handlers::orders;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/place-order")
            .route(web::post().to(orders::place_order))
    )
    .service(
        web::scope("/orders")
            .service(
                web::resource("")
                    .route(web::get().to(orders::order_history))
            )
            .service(
                web::resource("/{order_id}")
                    .route(web::get().to(orders::order_confirmation))
            )
    );
}
