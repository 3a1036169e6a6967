//! Event notification infrastructure for the Vet Scheduler platform.
//!
//! This crate provides the publish/subscribe hub the domain layer uses to fan
//! out notifications once a business operation has completed.
//!
//! # Architecture
//!
//! - **NotificationEvent**: Immutable payload broadcast verbatim to every subscriber
//! - **Subscriber**: Trait for anything that can receive a broadcast event
//! - **EntitySubscriber**: Subscriber named after a user or pet, logs what it receives
//! - **Notifier**: Owns a set of subscribers and delivers events to them in order
//!
//! This crate has no dependencies on internal crates (entity, domain, etc.),
//! avoiding circular dependencies. Event data is carried as serialized JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub mod error;
pub mod notifier;
pub mod subscriber;

pub use error::{Error, EventErrorKind};
pub use notifier::{Delivery, Notifier};
pub use subscriber::{EntitySubscriber, Subscriber, SubscriberKind};

/// Business events that subscribers can be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Emitted once a new appointment has been persisted.
    AppointmentCreated,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventType::AppointmentCreated => write!(f, "APPOINTMENT_CREATED"),
        }
    }
}

/// A structured event: a type tag plus arbitrary associated data.
/// Events are never mutated after construction; every subscriber sees the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
}

impl NotificationEvent {
    pub fn new(event_type: EventType, data: Value) -> Self {
        Self { event_type, data }
    }

    /// An `APPOINTMENT_CREATED` event carrying nothing beyond its type tag.
    pub fn appointment_created() -> Self {
        Self::new(EventType::AppointmentCreated, Value::Null)
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn data(&self) -> &Value {
        &self.data
    }
}
