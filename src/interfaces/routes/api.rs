use actix_web::web;

use crate::{
    handlers::{contact_me, json_error::not_found, system},
    middlewares::rate_limit::ApiRateLimit,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(ApiRateLimit)
            .service(system::health_check)
            .service(
                web::resource("/contact")
                    .route(web::post().to(contact_me::submit_contact))
                    .default_service(web::to(not_found))
            )
    );
}
