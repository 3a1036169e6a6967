//! Persists new appointments on behalf of the authenticated actor.

use super::{NewAppointment, ResolvedAppointment};
use crate::error::Error;
use crate::{appointments, Id};
use log::*;
use sea_orm::DatabaseConnection;

/// Persists `new_appointment` owned by `user_id`, the authenticated actor.
///
/// Any user id supplied in the input is discarded. The returned appointment has
/// its pet and user resolved to full records. Persistence failures are passed
/// through untranslated.
pub async fn create(
    db: &DatabaseConnection,
    new_appointment: NewAppointment,
    user_id: Id,
) -> Result<ResolvedAppointment, Error> {
    info!("Appointment Creator: Creating appointment");

    let pet_id = new_appointment
        .pet_id
        .as_deref()
        .map(str::trim)
        .and_then(|id| Id::parse_str(id).ok())
        .ok_or_else(|| Error::validation("petId is required."))?;
    let scheduled_at = new_appointment
        .scheduled_at
        .ok_or_else(|| Error::validation("scheduledAt is required."))?;

    if new_appointment.user_id.is_some() {
        debug!("Appointment Creator: ignoring caller supplied owner, using {user_id}");
    }

    let now = chrono::Utc::now();
    let appointment_model = appointments::Model {
        id: Id::nil(),
        pet_id,
        user_id,
        scheduled_at,
        status: new_appointment.status.unwrap_or_default(),
        reason: new_appointment.reason,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let appointment = entity_api::appointment::create(db, appointment_model, user_id).await?;
    info!("Appointment Creator: Appointment saved");

    let pet = entity_api::pet::find_by_id(db, appointment.pet_id).await?;
    let user = entity_api::user::find_by_id(db, appointment.user_id).await?;

    Ok(ResolvedAppointment {
        appointment,
        pet,
        user,
    })
}
