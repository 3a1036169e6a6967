use crate::{Error, NotificationEvent};
use async_trait::async_trait;
use log::*;
use std::fmt;

/// Trait for anything that can receive a broadcast [`NotificationEvent`].
/// Implementations can perform side effects like sending notifications,
/// updating caches, logging, etc.
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Display name used when reporting deliveries and failures.
    fn name(&self) -> &str;

    async fn receive(&self, event: &NotificationEvent) -> Result<(), Error>;
}

/// Which kind of subject an [`EntitySubscriber`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberKind {
    User,
    Pet,
}

impl fmt::Display for SubscriberKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubscriberKind::User => write!(f, "User"),
            SubscriberKind::Pet => write!(f, "Pet"),
        }
    }
}

/// A subscriber named after a user or a pet. Receiving an event only logs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySubscriber {
    name: String,
    kind: SubscriberKind,
}

impl EntitySubscriber {
    pub fn new(kind: SubscriberKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(SubscriberKind::User, name)
    }

    pub fn pet(name: impl Into<String>) -> Self {
        Self::new(SubscriberKind::Pet, name)
    }

    pub fn kind(&self) -> SubscriberKind {
        self.kind
    }
}

#[async_trait]
impl Subscriber for EntitySubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive(&self, event: &NotificationEvent) -> Result<(), Error> {
        match self.kind {
            SubscriberKind::User => info!(
                "User {} notified of {}",
                self.name,
                event.event_type()
            ),
            SubscriberKind::Pet => info!(
                "Pet {} has a new notification: {}",
                self.name,
                event.event_type()
            ),
        }
        Ok(())
    }
}
