//! Appointment booking.
//!
//! [`AppointmentFacade::create_complete_appointment`] is the single entry point
//! the web layer uses to book an appointment. It sequences the independent
//! steps of a booking:
//!
//! 1. [`validation::validate_user`] makes sure the actor has an identity,
//! 2. [`validation::check_pet`] makes sure the pet exists,
//! 3. [`creator::create`] persists the appointment and resolves its pet and user,
//! 4. [`notification::NotificationSender::send`] tells the user and the pet.
//!
//! Nothing is persisted unless both validation steps pass. The steps are not
//! wrapped in a transaction: if notification fails after the appointment was
//! saved, the appointment stays saved and the error is still returned.

use crate::actor::Actor;
use crate::appointment_status::AppointmentStatus;
use crate::error::Error;
use crate::{appointments, pets, users, Id};
use chrono::{DateTime, FixedOffset};
use events::Delivery;
use log::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;
use utoipa::ToSchema;

pub mod creator;
pub mod notification;
pub mod validation;

pub use entity_api::appointment::{delete_by_id, find_by_pet_id, update};

pub const CREATED_MESSAGE: &str = "Appointment created and notifications sent!";

/// Request to book an appointment.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    #[serde(alias = "pet_id")]
    pub pet_id: Option<String>,
    #[serde(alias = "scheduled_at")]
    #[schema(value_type = String, format = DateTime)]
    pub scheduled_at: Option<DateTime<FixedOffset>>,
    pub status: Option<AppointmentStatus>,
    pub reason: Option<String>,
    /// Accepted for compatibility but never trusted: the owner is always the
    /// authenticated actor.
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
}

/// A persisted appointment together with the pet and user it references.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAppointment {
    #[serde(flatten)]
    pub appointment: appointments::Model,
    pub pet: pets::Model,
    pub user: users::Model,
}

/// Contact details recorded on the pet for its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PetOwner {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl From<&pets::Model> for PetOwner {
    fn from(pet: &pets::Model) -> Self {
        Self {
            name: pet.owner_name.clone(),
            phone: pet.owner_phone.clone(),
        }
    }
}

/// What a successful booking reports back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentConfirmation {
    pub success: bool,
    pub appointment: ResolvedAppointment,
    pub user_id: Id,
    pub pet_id: Id,
    pub owner: PetOwner,
    pub message: String,
    #[serde(skip)]
    pub delivery: Delivery,
}

/// Single entry point for booking an appointment.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFacade {
    notification_sender: notification::NotificationSender,
}

impl AppointmentFacade {
    pub fn new(dispatch_timeout: Duration) -> Self {
        Self {
            notification_sender: notification::NotificationSender::new(dispatch_timeout),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.notification_timeout())
    }

    pub async fn create_complete_appointment(
        &self,
        db: &DatabaseConnection,
        new_appointment: NewAppointment,
        actor: &Actor,
    ) -> Result<AppointmentConfirmation, Error> {
        info!("Facade: Starting appointment creation process");

        let user_id = validation::validate_user(actor)?;
        let pet = validation::check_pet(db, new_appointment.pet_id.as_deref()).await?;
        debug!("Facade: booking pet {} for user {user_id}", pet.id);

        let resolved = creator::create(db, new_appointment, user_id).await?;

        let delivery = self.notification_sender.send(&resolved).await?;

        info!("Facade: Appointment {} created", resolved.appointment.id);

        Ok(AppointmentConfirmation {
            success: true,
            user_id: resolved.user.id,
            pet_id: resolved.pet.id,
            owner: PetOwner::from(&resolved.pet),
            message: CREATED_MESSAGE.to_string(),
            appointment: resolved,
            delivery,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appointment_accepts_camel_and_snake_case_keys() {
        let camel: NewAppointment = serde_json::from_value(serde_json::json!({
            "petId": "abc",
            "scheduledAt": "2026-10-20T09:30:00+02:00",
            "userId": "someone-else",
        }))
        .unwrap();
        let snake: NewAppointment = serde_json::from_value(serde_json::json!({
            "pet_id": "abc",
            "scheduled_at": "2026-10-20T09:30:00+02:00",
        }))
        .unwrap();

        assert_eq!(camel.pet_id.as_deref(), Some("abc"));
        assert_eq!(camel.user_id.as_deref(), Some("someone-else"));
        assert_eq!(snake.pet_id.as_deref(), Some("abc"));
        assert_eq!(camel.scheduled_at, snake.scheduled_at);
    }

    // We need to gate seaORM's mock feature behind conditional compilation because
    // the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
    // see https://github.com/SeaQL/sea-orm/issues/830
    #[cfg(feature = "mock")]
    mod facade {
        use super::*;
        use crate::error::{DomainErrorKind, EntityErrorKind};
        use crate::roles::Role;
        use events::EventType;
        use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

        fn user() -> users::Model {
            let now = chrono::Utc::now();
            users::Model {
                id: Id::new_v4(),
                email: "frontdesk@vetscheduler.dev".to_owned(),
                name: "Jamie Rivera".to_owned(),
                role: Role::User,
                created_at: now.into(),
                updated_at: now.into(),
            }
        }

        fn pet() -> pets::Model {
            let now = chrono::Utc::now();
            pets::Model {
                id: Id::new_v4(),
                name: "Biscuit".to_owned(),
                species: Some("dog".to_owned()),
                owner_name: Some("Pat Morgan".to_owned()),
                owner_phone: Some("555-0142".to_owned()),
                created_at: now.into(),
                updated_at: now.into(),
            }
        }

        fn appointment(pet: &pets::Model, user: &users::Model) -> appointments::Model {
            let now = chrono::Utc::now();
            appointments::Model {
                id: Id::new_v4(),
                pet_id: pet.id,
                user_id: user.id,
                scheduled_at: now.into(),
                status: AppointmentStatus::Scheduled,
                reason: Some("Annual checkup".to_owned()),
                created_at: now.into(),
                updated_at: now.into(),
            }
        }

        fn request(pet_id: &str) -> NewAppointment {
            NewAppointment {
                pet_id: Some(pet_id.to_owned()),
                scheduled_at: Some(chrono::Utc::now().into()),
                reason: Some("Annual checkup".to_owned()),
                ..Default::default()
            }
        }

        /// Queues the four results a successful booking reads: pet check, insert,
        /// pet lookup and user lookup.
        fn successful_booking(
            mock: MockDatabase,
            pet: &pets::Model,
            user: &users::Model,
        ) -> MockDatabase {
            mock.append_query_results(vec![vec![pet.clone()]])
                .append_query_results(vec![vec![appointment(pet, user)]])
                .append_query_results(vec![vec![pet.clone()]])
                .append_query_results(vec![vec![user.clone()]])
        }

        #[tokio::test]
        async fn books_the_appointment_and_notifies_user_then_pet() {
            let pet = pet();
            let user = user();
            let db = successful_booking(MockDatabase::new(DatabaseBackend::Postgres), &pet, &user)
                .into_connection();
            let actor = Actor::new(user.id, Role::User);

            let confirmation = AppointmentFacade::default()
                .create_complete_appointment(&db, request(&pet.id.to_string()), &actor)
                .await
                .unwrap();

            assert!(confirmation.success);
            assert_eq!(confirmation.message, CREATED_MESSAGE);
            assert_eq!(confirmation.user_id, user.id);
            assert_eq!(confirmation.pet_id, pet.id);
            assert_eq!(confirmation.appointment.appointment.user_id, user.id);
            assert_eq!(
                confirmation.owner,
                PetOwner {
                    name: Some("Pat Morgan".to_owned()),
                    phone: Some("555-0142".to_owned()),
                }
            );
            assert_eq!(confirmation.delivery.event_type, EventType::AppointmentCreated);
            assert_eq!(confirmation.delivery.recipients, vec!["Jamie Rivera", "Biscuit"]);
            assert_eq!(db.into_transaction_log().len(), 4);
        }

        #[tokio::test]
        async fn confirmation_serializes_with_camel_case_keys_and_no_delivery() {
            let pet = pet();
            let user = user();
            let db = successful_booking(MockDatabase::new(DatabaseBackend::Postgres), &pet, &user)
                .into_connection();

            let confirmation = AppointmentFacade::default()
                .create_complete_appointment(
                    &db,
                    request(&pet.id.to_string()),
                    &Actor::new(user.id, Role::User),
                )
                .await
                .unwrap();
            let json = serde_json::to_value(&confirmation).unwrap();

            assert_eq!(json["success"], true);
            assert_eq!(json["userId"], user.id.to_string());
            assert_eq!(json["petId"], pet.id.to_string());
            assert_eq!(json["owner"]["name"], "Pat Morgan");
            assert_eq!(json["owner"]["phone"], "555-0142");
            assert_eq!(json["appointment"]["pet"]["name"], "Biscuit");
            assert_eq!(json["appointment"]["user"]["name"], "Jamie Rivera");
            assert!(json.get("delivery").is_none());
        }

        #[tokio::test]
        async fn caller_supplied_owner_is_ignored() {
            let pet = pet();
            let user = user();
            let db = successful_booking(MockDatabase::new(DatabaseBackend::Postgres), &pet, &user)
                .into_connection();
            let mut new_appointment = request(&pet.id.to_string());
            new_appointment.user_id = Some(Id::new_v4().to_string());

            let confirmation = AppointmentFacade::default()
                .create_complete_appointment(&db, new_appointment, &Actor::new(user.id, Role::User))
                .await
                .unwrap();

            assert_eq!(confirmation.user_id, user.id);
        }

        #[tokio::test]
        async fn unknown_pet_is_not_found_and_nothing_is_created() {
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![Vec::<pets::Model>::new()])
                .into_connection();

            let err = AppointmentFacade::default()
                .create_complete_appointment(
                    &db,
                    request(&Id::new_v4().to_string()),
                    &Actor::new(Id::new_v4(), Role::User),
                )
                .await
                .unwrap_err();

            assert_eq!(
                err.error_kind,
                DomainErrorKind::Entity(EntityErrorKind::NotFound)
            );
            assert_eq!(err.to_string(), "Pet not found.");
            assert_eq!(db.into_transaction_log().len(), 1);
        }

        #[tokio::test]
        async fn malformed_pet_id_is_not_found_without_touching_the_database() {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

            let err = AppointmentFacade::default()
                .create_complete_appointment(
                    &db,
                    request("missing"),
                    &Actor::new(Id::new_v4(), Role::User),
                )
                .await
                .unwrap_err();

            assert!(err.is_not_found());
            assert_eq!(err.to_string(), "Pet not found.");
            assert!(db.into_transaction_log().is_empty());
        }

        #[tokio::test]
        async fn missing_pet_id_is_a_validation_error() {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

            let err = AppointmentFacade::default()
                .create_complete_appointment(
                    &db,
                    NewAppointment::default(),
                    &Actor::new(Id::new_v4(), Role::User),
                )
                .await
                .unwrap_err();

            assert_eq!(err.error_kind, DomainErrorKind::Validation);
            assert_eq!(err.to_string(), "petId is required.");
            assert!(db.into_transaction_log().is_empty());
        }

        #[tokio::test]
        async fn actor_without_an_id_is_rejected_before_any_persistence() {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
            let actor = Actor {
                id: None,
                role: Role::Admin,
            };

            let err = AppointmentFacade::default()
                .create_complete_appointment(&db, request(&Id::new_v4().to_string()), &actor)
                .await
                .unwrap_err();

            assert_eq!(err.error_kind, DomainErrorKind::Validation);
            assert_eq!(err.to_string(), "Invalid user.");
            assert!(db.into_transaction_log().is_empty());
        }

        #[tokio::test]
        async fn persistence_failures_propagate_after_the_checks_pass() {
            let pet = pet();
            let db = MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![pet.clone()]])
                .append_query_errors(vec![DbErr::Custom("connection reset".to_owned())])
                .into_connection();

            let err = AppointmentFacade::default()
                .create_complete_appointment(
                    &db,
                    request(&pet.id.to_string()),
                    &Actor::new(Id::new_v4(), Role::User),
                )
                .await
                .unwrap_err();

            assert!(matches!(err.error_kind, DomainErrorKind::Entity(_)));
            assert!(!err.is_not_found());
            assert!(err.source.is_some());
        }

        #[tokio::test]
        async fn booking_twice_creates_two_appointments_with_separate_deliveries() {
            let pet = pet();
            let user = user();
            let mock = MockDatabase::new(DatabaseBackend::Postgres);
            let db = successful_booking(successful_booking(mock, &pet, &user), &pet, &user)
                .into_connection();
            let facade = AppointmentFacade::default();
            let actor = Actor::new(user.id, Role::User);

            let first = facade
                .create_complete_appointment(&db, request(&pet.id.to_string()), &actor)
                .await
                .unwrap();
            let second = facade
                .create_complete_appointment(&db, request(&pet.id.to_string()), &actor)
                .await
                .unwrap();

            assert_ne!(
                first.appointment.appointment.id,
                second.appointment.appointment.id
            );
            assert_eq!(first.delivery.recipients.len(), 2);
            assert_eq!(second.delivery.recipients.len(), 2);
            assert_eq!(db.into_transaction_log().len(), 8);
        }
    }
}
