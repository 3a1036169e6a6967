use super::error::{EntityApiErrorKind, Error};
use crate::set_or_keep;
use entity::appointments::{ActiveModel, Column, Entity, Model};
use entity::{appointment_status::AppointmentStatus, Id};
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

use log::*;

/// Inserts a new appointment owned by `user_id`. Any `user_id` carried on the
/// incoming model is ignored.
pub async fn create(
    db: &DatabaseConnection,
    appointment_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    debug!("New Appointment Model to be inserted: {appointment_model:?}");

    let now = chrono::Utc::now();

    let appointment_active_model: ActiveModel = ActiveModel {
        pet_id: Set(appointment_model.pet_id),
        user_id: Set(user_id),
        scheduled_at: Set(appointment_model.scheduled_at),
        status: Set(appointment_model.status),
        reason: Set(appointment_model.reason),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(appointment_active_model
        .save(db)
        .await?
        .try_into_model()?)
}

/// Reschedules or otherwise changes appointment `id`. Fields passed as `None`
/// keep their stored value; the pet and the owner never change.
pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    scheduled_at: Option<DateTimeWithTimeZone>,
    status: Option<AppointmentStatus>,
    reason: Option<String>,
) -> Result<Model, Error> {
    let appointment = find_by_id(db, id).await?;
    debug!("Existing Appointment model to be Updated: {appointment:?}");

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(appointment.id),
        pet_id: Unchanged(appointment.pet_id),
        user_id: Unchanged(appointment.user_id),
        scheduled_at: set_or_keep(scheduled_at, appointment.scheduled_at),
        status: set_or_keep(status, appointment.status),
        reason: match reason {
            Some(reason) => Set(Some(reason)),
            None => Unchanged(appointment.reason),
        },
        created_at: Unchanged(appointment.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;

    Ok(())
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Finds appointments ordered by their scheduled time, optionally restricted to one pet.
pub async fn find_by_pet_id(
    db: &DatabaseConnection,
    pet_id: Option<Id>,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find();
    if let Some(pet_id) = pet_id {
        query = query.filter(Column::PetId.eq(pet_id));
    }

    Ok(query.order_by_asc(Column::ScheduledAt).all(db).await?)
}
