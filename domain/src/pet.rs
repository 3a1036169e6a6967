//! Pet operations, including the admin-only guard around pet deletion.
//!
//! Deletion is the one destructive operation exposed for pets, so it goes
//! through [`AdminOnly`], which checks the actor's role before delegating to the
//! wrapped [`PetRemover`]. A refused deletion is reported as
//! [`Guarded::Denied`] rather than as an error: callers must match both arms.

use crate::actor::Actor;
use crate::error::Error;
use crate::roles::Role;
use crate::Id;
use async_trait::async_trait;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;

pub use entity_api::pet::{create, find_all, find_by_id, update};

pub const DELETED_MESSAGE: &str = "Pet deleted";
pub const DENIED_MESSAGE: &str = "Only admin can delete";
pub const NOT_FOUND_MESSAGE: &str = "Pet not found.";

/// Result of a completed pet deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deletion {
    pub message: String,
}

/// Outcome of an operation behind an authorization guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The actor was allowed through; carries the wrapped operation's result verbatim.
    Authorized(T),
    /// The actor was refused; the wrapped operation was never invoked.
    Denied(String),
}

/// The real pet deletion operation that [`AdminOnly`] stands in front of.
#[async_trait]
pub trait PetRemover: Send + Sync {
    async fn delete_pet(&self, id: Id) -> Result<Deletion, Error>;
}

/// Deletes pets from the database.
pub struct PetStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PetStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PetRemover for PetStore<'_> {
    async fn delete_pet(&self, id: Id) -> Result<Deletion, Error> {
        entity_api::pet::delete_by_id(self.db, id)
            .await
            .map_err(|err| {
                let err = Error::from(err);
                if err.is_not_found() {
                    Error {
                        message: Some(NOT_FOUND_MESSAGE.to_string()),
                        ..err
                    }
                } else {
                    err
                }
            })?;
        info!("Pet {id} deleted");

        Ok(Deletion {
            message: DELETED_MESSAGE.to_string(),
        })
    }
}

/// Authorization proxy letting only admins reach the wrapped [`PetRemover`].
pub struct AdminOnly<R> {
    inner: R,
}

impl<R: PetRemover> AdminOnly<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub async fn delete_pet(&self, actor: &Actor, id: Id) -> Result<Guarded<Deletion>, Error> {
        match actor.role {
            Role::Admin => Ok(Guarded::Authorized(self.inner.delete_pet(id).await?)),
            Role::User => {
                warn!("Refusing to delete pet {id}: actor {:?} is not an admin", actor.id);
                Ok(Guarded::Denied(DENIED_MESSAGE.to_string()))
            }
        }
    }
}

/// Deletes the pet `id` on behalf of `actor`, provided the actor is an admin.
pub async fn delete_as(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Id,
) -> Result<Guarded<Deletion>, Error> {
    AdminOnly::new(PetStore::new(db)).delete_pet(actor, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts deletions instead of touching a database.
    #[derive(Default)]
    struct CountingRemover {
        calls: Arc<AtomicUsize>,
        missing: bool,
    }

    #[async_trait]
    impl PetRemover for CountingRemover {
        async fn delete_pet(&self, _id: Id) -> Result<Deletion, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.missing {
                return Err(Error::not_found("Pet not found."));
            }
            Ok(Deletion {
                message: DELETED_MESSAGE.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn admins_delete_exactly_once_and_get_the_result_verbatim() {
        let calls = Arc::new(AtomicUsize::new(0));
        let guard = AdminOnly::new(CountingRemover {
            calls: Arc::clone(&calls),
            missing: false,
        });

        let outcome = guard
            .delete_pet(&Actor::new(Id::new_v4(), Role::Admin), Id::new_v4())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Guarded::Authorized(Deletion {
                message: "Pet deleted".to_string()
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_admins_are_denied_without_reaching_the_remover() {
        let calls = Arc::new(AtomicUsize::new(0));
        let guard = AdminOnly::new(CountingRemover {
            calls: Arc::clone(&calls),
            missing: false,
        });

        let outcome = guard
            .delete_pet(&Actor::new(Id::new_v4(), Role::User), Id::new_v4())
            .await
            .unwrap();

        assert_eq!(outcome, Guarded::Denied("Only admin can delete".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remover_failures_propagate_for_admins() {
        let guard = AdminOnly::new(CountingRemover {
            missing: true,
            ..Default::default()
        });

        let err = guard
            .delete_pet(&Actor::new(Id::new_v4(), Role::Admin), Id::new_v4())
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Entity(EntityErrorKind::NotFound)
        );
    }

    #[cfg(feature = "mock")]
    mod store {
        use super::*;
        use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

        #[tokio::test]
        async fn delete_as_admin_removes_the_pet_from_the_database() {
            let now = chrono::Utc::now();
            let pet = crate::pets::Model {
                id: Id::new_v4(),
                name: "Biscuit".to_owned(),
                species: Some("dog".to_owned()),
                owner_name: Some("Pat Morgan".to_owned()),
                owner_phone: Some("555-0142".to_owned()),
                created_at: now.into(),
                updated_at: now.into(),
            };
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![pet.clone()]])
                .append_exec_results(vec![MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection();

            let outcome = delete_as(&db, &Actor::new(Id::new_v4(), Role::Admin), pet.id)
                .await
                .unwrap();

            assert!(matches!(outcome, Guarded::Authorized(_)));
            assert_eq!(db.into_transaction_log().len(), 2);
        }

        #[tokio::test]
        async fn deleting_an_unknown_pet_reports_it_as_not_found() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![Vec::<crate::pets::Model>::new()])
                .into_connection();

            let err = delete_as(&db, &Actor::new(Id::new_v4(), Role::Admin), Id::new_v4())
                .await
                .unwrap_err();

            assert!(err.is_not_found());
            assert_eq!(err.to_string(), "Pet not found.");
            assert!(err.source.is_some());
        }

        #[tokio::test]
        async fn delete_as_user_never_touches_the_database() {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

            let outcome = delete_as(&db, &Actor::new(Id::new_v4(), Role::User), Id::new_v4())
                .await
                .unwrap();

            assert!(matches!(outcome, Guarded::Denied(_)));
            assert!(db.into_transaction_log().is_empty());
        }
    }
}
