use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::extractors::{authenticated_actor::AuthenticatedActor, json_body::JsonBody};
use crate::params::user::ProfileParams;
use crate::{AppState, Error};
use domain::actor::Actor;
use domain::error::Error as DomainError;
use domain::{user as UserApi, Id};
use log::*;

fn actor_id(actor: &Actor) -> Result<Id, DomainError> {
    actor
        .id
        .ok_or_else(|| DomainError::validation("Invalid user."))
}

/// GET the authenticated user's own record
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Successfully retrieved the authenticated User", body = domain::users::Model),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn profile(
    AuthenticatedActor(actor): AuthenticatedActor,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let id = actor_id(&actor)?;
    debug!("GET profile for User {id}");

    let user = UserApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(user))
}

/// PUT update the authenticated user's own name or email
///
/// The user to update is always the one behind the session token.
#[utoipa::path(
    put,
    path = "/profile",
    request_body = ProfileParams,
    responses(
        (status = 200, description = "Successfully updated the authenticated User", body = domain::users::Model),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    AuthenticatedActor(actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    JsonBody(params): JsonBody<ProfileParams>,
) -> Result<impl IntoResponse, Error> {
    let id = actor_id(&actor)?;
    debug!("PUT Update profile for User {id}: {params:?}");

    let user = UserApi::update(app_state.db_conn_ref(), id, params.name, params.email).await?;

    Ok(Json(user))
}
