use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::extractors::{authenticated_actor::AuthenticatedActor, json_body::JsonBody};
use crate::params::pet::PetParams;
use crate::{AppState, Error};
use domain::pet::{self as PetApi, Guarded};
use domain::{pets::Model, Id};
use log::*;

impl From<PetParams> for Model {
    fn from(params: PetParams) -> Self {
        let now = chrono::Utc::now();
        Model {
            id: Id::nil(),
            name: params.name,
            species: params.species,
            owner_name: params.owner_name,
            owner_phone: params.owner_phone,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }
}

/// POST create a new Pet
#[utoipa::path(
    post,
    path = "/pets",
    request_body = PetParams,
    responses(
        (status = 201, description = "Successfully created a new Pet", body = domain::pets::Model),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    AuthenticatedActor(_actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    JsonBody(params): JsonBody<PetParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Pet from: {params:?}");

    let pet = PetApi::create(app_state.db_conn_ref(), params.into()).await?;

    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET all Pets
#[utoipa::path(
    get,
    path = "/pets",
    responses(
        (status = 200, description = "Successfully retrieved all Pets", body = [domain::pets::Model]),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn index(
    AuthenticatedActor(_actor): AuthenticatedActor,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let pets = PetApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(pets))
}

/// GET a particular Pet specified by its id
#[utoipa::path(
    get,
    path = "/pets/{id}",
    params(
        ("id" = String, Path, description = "Pet id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Pet by its id", body = domain::pets::Model),
        (status = 400, description = "Pet not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read(
    AuthenticatedActor(_actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Pet by id: {id}");

    let pet = PetApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(pet))
}

/// PUT update a Pet's details
#[utoipa::path(
    put,
    path = "/pets/{id}",
    params(
        ("id" = String, Path, description = "Id of the Pet to update"),
    ),
    request_body = PetParams,
    responses(
        (status = 200, description = "Successfully updated the Pet", body = domain::pets::Model),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update(
    AuthenticatedActor(_actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    JsonBody(params): JsonBody<PetParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Pet with id: {id}");

    let pet = PetApi::update(app_state.db_conn_ref(), id, params.into()).await?;

    Ok(Json(pet))
}

/// DELETE a Pet specified by its id. Only admins may delete pets.
///
/// A refused deletion is not an error: it answers 200 with the refusal message.
#[utoipa::path(
    delete,
    path = "/pets/{id}",
    params(
        ("id" = String, Path, description = "Id of the Pet to delete"),
    ),
    responses(
        (status = 200, description = "The Pet was deleted, or the caller is not an admin"),
        (status = 400, description = "Pet not found"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete(
    AuthenticatedActor(actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Pet by id: {id}");

    let message = match PetApi::delete_as(app_state.db_conn_ref(), &actor, id).await? {
        Guarded::Authorized(deletion) => deletion.message,
        Guarded::Denied(message) => message,
    };

    Ok(Json(json!({ "message": message })))
}
