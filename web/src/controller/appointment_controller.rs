use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::extractors::{authenticated_actor::AuthenticatedActor, json_body::JsonBody};
use crate::params::appointment::{IndexParams, UpdateParams};
use crate::{AppState, Error};
use domain::appointment::{self as AppointmentApi, NewAppointment};
use domain::Id;
use log::*;

pub(crate) const DELETED_MESSAGE: &str = "Appointment deleted";

/// POST book a new Appointment for the authenticated user
///
/// The pet must exist. Once the appointment is saved, the user and the pet are
/// notified before the response is sent.
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = NewAppointment,
    responses(
        (status = 201, description = "Successfully booked a new Appointment"),
        (status = 400, description = "Invalid input, unknown pet or failed notification"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    AuthenticatedActor(actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    JsonBody(new_appointment): JsonBody<NewAppointment>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Appointment from: {new_appointment:?}");

    let confirmation = app_state
        .appointment_facade
        .create_complete_appointment(app_state.db_conn_ref(), new_appointment, &actor)
        .await?;

    debug!(
        "Appointment {} delivered to {:?}",
        confirmation.appointment.appointment.id, confirmation.delivery.recipients
    );

    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// GET all Appointments, optionally only those for one pet
#[utoipa::path(
    get,
    path = "/appointments",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Appointments", body = [domain::appointments::Model]),
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
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Appointments with params: {params:?}");

    let appointments = AppointmentApi::find_by_pet_id(app_state.db_conn_ref(), params.pet_id).await?;

    Ok(Json(appointments))
}

/// PUT update an Appointment's time, status or reason
#[utoipa::path(
    put,
    path = "/appointments/{id}",
    params(
        ("id" = String, Path, description = "Id of the Appointment to update"),
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated Appointment", body = domain::appointments::Model),
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
    JsonBody(params): JsonBody<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Appointment with id: {id}");

    let appointment = AppointmentApi::update(
        app_state.db_conn_ref(),
        id,
        params.scheduled_at,
        params.status,
        params.reason,
    )
    .await?;

    Ok(Json(appointment))
}

/// DELETE an Appointment specified by its id
#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    params(
        ("id" = String, Path, description = "Id of the Appointment to delete"),
    ),
    responses(
        (status = 200, description = "Successfully deleted the Appointment"),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete(
    AuthenticatedActor(_actor): AuthenticatedActor,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Appointment by id: {id}");

    AppointmentApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}
