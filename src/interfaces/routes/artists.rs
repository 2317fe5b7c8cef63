use actix_web::web;

use crate::handlers::artists;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/artists")
            .service(
                web::resource("")
                    .route(web::get().to(artists::list_artists))
                    .route(web::post().to(artists::create_artist))
            )
            .service(
                web::resource("/{artist_id}")
                    .route(web::get().to(artists::artist_detail))
                    .route(web::patch().to(artists::update_artist))
            )
            .service(
                web::resource("/{artist_id}/paintings")
                    .route(web::post().to(artists::add_painting))
            )
    );
}
