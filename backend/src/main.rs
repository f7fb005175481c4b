mod config;
mod error;
mod predictor;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use config::GatewayConfig;
use predictor::PredictorClient;
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = GatewayConfig::load().map_err(|e| {
        log::error!("Failed to load gateway configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Configuration error: {}", e))
    })?;

    let predictor = PredictorClient::new(&config).map_err(|e| {
        log::error!("Failed to build prediction client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("HTTP client error: {}", e))
    })?;

    if !config.frontend_dir.is_dir() {
        log::warn!(
            "Frontend directory {} does not exist. Build it with `trunk build` in frontend/.",
            config.frontend_dir.display()
        );
    }

    log::info!("Forwarding predictions to {}", config.predictor_url);
    log::info!("Serving frontend from {}", config.frontend_dir.display());

    let bind_address = config.bind_address();
    let frontend_dir = config.frontend_dir.clone();
    let config = web::Data::new(config);
    let predictor = web::Data::new(predictor);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(config.clone())
            .app_data(predictor.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
