use actix_web::web;

pub mod api;

/// Register the pricing API routes and their extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(api::query_config())
        .service(api::health)
        .service(api::api_v1_prices);
}
