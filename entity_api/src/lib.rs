use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, Set, Unchanged, Value};

pub use entity::{appointment_status, appointments, pets, roles, users, Id};

pub mod appointment;
pub mod error;
pub mod pet;
pub mod user;

pub(crate) fn uuid_parse_str(uuid_str: &str) -> Result<Id, error::Error> {
    Id::parse_str(uuid_str).map_err(|_| error::Error {
        source: None,
        error_kind: error::EntityApiErrorKind::InvalidQueryTerm,
    })
}

/// Writes `new` when present, otherwise keeps `current` out of the UPDATE.
pub(crate) fn set_or_keep<V: Into<Value>>(new: Option<V>, current: V) -> ActiveValue<V> {
    match new {
        Some(value) => Set(value),
        None => Unchanged(current),
    }
}

/// Inserts a small set of users and pets for local development and returns the
/// seeded users so callers can mint session tokens for them.
pub async fn seed_database(db: &DatabaseConnection) -> Result<Vec<users::Model>, error::Error> {
    let now = Utc::now();

    let admin_user = users::ActiveModel {
        email: Set("admin@vetscheduler.dev".to_owned()),
        name: Set("Admin User".to_owned()),
        role: Set(roles::Role::Admin),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let front_desk_user = users::ActiveModel {
        email: Set("frontdesk@vetscheduler.dev".to_owned()),
        name: Set("Jamie Rivera".to_owned()),
        role: Set(roles::Role::User),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    pets::ActiveModel {
        name: Set("Biscuit".to_owned()),
        species: Set(Some("dog".to_owned())),
        owner_name: Set(Some("Pat Morgan".to_owned())),
        owner_phone: Set(Some("555-0142".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    pets::ActiveModel {
        name: Set("Miso".to_owned()),
        species: Set(Some("cat".to_owned())),
        owner_name: Set(Some("Sam Okafor".to_owned())),
        owner_phone: Set(Some("555-0199".to_owned())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(vec![admin_user, front_desk_user])
}
