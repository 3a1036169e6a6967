use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use domain::jwt;
use log::*;
use serde_json::json;

/// Authentication middleware that returns 401 Unauthorized for requests without
/// a valid bearer session token.
///
/// On success the verified [`domain::actor::Actor`] is stored in the request
/// extensions, where the `AuthenticatedActor` extractor picks it up.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        debug!("Rejecting request to {}: no bearer token", request.uri());
        return unauthorized("Missing session token.");
    };

    match jwt::verify_session_token(app_state.config(), token) {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => {
            warn!("Rejecting request to {}: {e:?}", request.uri());
            unauthorized(&e.to_string())
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": message })),
    )
        .into_response()
}
