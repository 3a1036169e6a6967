use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use domain::appointment::AppointmentFacade;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

mod controller;
mod error;
pub(crate) mod extractors;
pub(crate) mod middleware;
pub(crate) mod params;
mod router;

pub use error::{Error, Result};

/// Web-level state: the service infrastructure plus the long-lived domain
/// objects the handlers share.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    service_state: service::AppState,
    pub appointment_facade: Arc<AppointmentFacade>,
}

impl AppState {
    pub fn new(service_state: service::AppState) -> Self {
        let appointment_facade = Arc::new(AppointmentFacade::from_config(&service_state.config));

        Self {
            service_state,
            appointment_facade,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.service_state.db_conn_ref()
    }

    pub fn config(&self) -> &Config {
        &self.service_state.config
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let server_url = format!(
        "{}:{}",
        app_state.config().interface.as_deref().unwrap_or("127.0.0.1"),
        app_state.config().port
    );

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::DELETE, Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(AllowOrigin::any());

    let listener = tokio::net::TcpListener::bind(&server_url).await?;

    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(
        listener,
        router::define_routes(app_state).layer(cors_layer),
    )
    .await
}
