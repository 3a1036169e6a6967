use super::error::{EntityApiErrorKind, Error};
use crate::set_or_keep;
use chrono::Utc;
use entity::users::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set, Unchanged};

pub use entity::roles::Role;

/// Updates the name and/or email of user `id`. Fields passed as `None` keep
/// their stored value. The role is never touched.
pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    name: Option<String>,
    email: Option<String>,
) -> Result<Model, Error> {
    let user = find_by_id(db, id).await?;
    debug!("Existing User model to be Updated: {user:?}");

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(user.id),
        email: set_or_keep(email, user.email),
        name: set_or_keep(name, user.name),
        role: Unchanged(user.role),
        created_at: Unchanged(user.created_at),
        updated_at: Set(Utc::now().into()),
    };

    Ok(active_model.update(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}
