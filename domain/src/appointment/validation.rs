//! Stateless checks that gate appointment creation.

use crate::actor::Actor;
use crate::error::{DomainErrorKind, EntityErrorKind, Error};
use crate::{pets, Id};
use entity_api::error::EntityApiErrorKind;
use log::*;
use sea_orm::DatabaseConnection;

/// Resolves the pet an appointment is being booked for.
///
/// A missing id is a validation error. An id that matches no pet, including one
/// that is not a well-formed id at all, is reported as not found.
pub async fn check_pet(db: &DatabaseConnection, pet_id: Option<&str>) -> Result<pets::Model, Error> {
    let pet_id = pet_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::validation("petId is required."))?;

    match entity_api::pet::find_by_id_str(db, pet_id).await {
        Ok(pet) => {
            debug!("Pet Checker: found pet {}", pet.id);
            Ok(pet)
        }
        Err(err)
            if matches!(
                err.error_kind,
                EntityApiErrorKind::RecordNotFound | EntityApiErrorKind::InvalidQueryTerm
            ) =>
        {
            warn!("Pet Checker: no pet with id {pet_id}");
            Err(Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Entity(EntityErrorKind::NotFound),
                message: Some("Pet not found.".to_string()),
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Returns the actor's id, or a validation error when the actor has none.
pub fn validate_user(actor: &Actor) -> Result<Id, Error> {
    info!("User Validator: Validating user");
    actor.id.ok_or_else(|| Error::validation("Invalid user."))
}
