use log::*;
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!(
        "Starting up Vet Scheduler Platform in {} mode...",
        config.runtime_env()
    );

    if config.jwt_secret().is_none() {
        if config.is_production() {
            error!("JWT_SECRET must be set when running in production");
            std::process::exit(1);
        }
        warn!("No JWT_SECRET configured, every authenticated request will be rejected");
    }

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let service_state = service::AppState::new(config, &db);
    let app_state = web::AppState::new(service_state);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}
