use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use pushkind_pricing::config::ServerConfig;
use pushkind_pricing::repository::{CachedPriceRuleReader, DieselRepository};
use pushkind_pricing::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    // Shared by all workers so every worker sees the same cache.
    let store = web::Data::new(CachedPriceRuleReader::new(
        DieselRepository::new(pool),
        config.cache_capacity,
    ));

    log::info!(
        "Starting pricing service on {}:{} (cache capacity {})",
        config.address,
        config.port,
        config.cache_capacity
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
