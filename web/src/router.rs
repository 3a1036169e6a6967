use crate::{
    controller::{appointment_controller, health_check_controller, pet_controller, user_controller},
    middleware::auth::require_auth,
    params, AppState,
};
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Vet Scheduler API"
        ),
        paths(
            appointment_controller::create,
            appointment_controller::index,
            appointment_controller::update,
            appointment_controller::delete,
            health_check_controller::health_check,
            pet_controller::create,
            pet_controller::index,
            pet_controller::read,
            pet_controller::update,
            pet_controller::delete,
            user_controller::profile,
            user_controller::update_profile,
        ),
        components(
            schemas(
                domain::appointments::Model,
                domain::appointment_status::AppointmentStatus,
                domain::appointment::NewAppointment,
                domain::appointment::PetOwner,
                domain::pets::Model,
                domain::roles::Role,
                domain::users::Model,
                params::appointment::UpdateParams,
                params::pet::PetParams,
                params::user::ProfileParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "vet_scheduler", description = "Vet Scheduler Pet & Appointment API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines our bearer session token requirement for gaining access to our
// API endpoints for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token signed with the server's JWT secret"))
                        .build(),
                ),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(appointment_routes(app_state.clone()))
        .merge(pet_routes(app_state.clone()))
        .merge(user_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn appointment_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/appointments", post(appointment_controller::create))
        .route("/appointments", get(appointment_controller::index))
        .route("/appointments/{id}", put(appointment_controller::update))
        .route("/appointments/{id}", delete(appointment_controller::delete))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn pet_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/pets", post(pet_controller::create))
        .route("/pets", get(pet_controller::index))
        .route("/pets/{id}", get(pet_controller::read))
        .route("/pets/{id}", put(pet_controller::update))
        .route("/pets/{id}", delete(pet_controller::delete))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/profile", get(user_controller::profile))
        .route("/profile", put(user_controller::update_profile))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}
