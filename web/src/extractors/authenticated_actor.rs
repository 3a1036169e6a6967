use crate::extractors::RejectionType;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::actor::Actor;

/// The actor behind the current request, as verified by the `require_auth`
/// middleware.
pub(crate) struct AuthenticatedActor(pub Actor);

impl<S> FromRequestParts<S> for AuthenticatedActor
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Actor>() {
            Some(actor) => Ok(AuthenticatedActor(actor.clone())),
            None => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        }
    }
}
