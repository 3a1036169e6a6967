//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure with
/// `domain::error::Error` as the root type holding a tree of `error_kind` enums
/// that represent the kinds of errors that can occur in the domain layer or in
/// lower layers. The `source` field holds the original error that caused the
/// domain error, and `message` an optional human readable explanation that the
/// `web` layer surfaces to clients unchanged.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
    pub message: Option<String>,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    /// Malformed or missing input, e.g. a missing pet id or an actor without an identity.
    Validation,
    Entity(EntityErrorKind),
    Notification(NotificationErrorKind),
    Unauthenticated,
    Config,
}

/// Enum representing the various kinds of entity errors that can bubble up from the "Entity" layer (`entity_api` and `entity`).
/// These errors are translated from the `entity_api` layer to the `domain` layer and reduced to a subset of error kinds
/// that are relevant to the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Invalid,
    DbTransaction,
    Other(String),
}

#[derive(Debug, PartialEq)]
pub enum NotificationErrorKind {
    Subscriber,
    Timeout,
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Validation,
            message: Some(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Entity(EntityErrorKind::NotFound),
            message: Some(message.into()),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self {
            source: None,
            error_kind: DomainErrorKind::Config,
            message: Some(message.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.error_kind == DomainErrorKind::Entity(EntityErrorKind::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source) {
            (Some(message), _) => write!(f, "{message}"),
            (None, Some(source)) => write!(f, "{source}"),
            (None, None) => write!(f, "Domain Error: {:?}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::InvalidQueryTerm => EntityErrorKind::Invalid,
            EntityApiErrorKind::SystemError => EntityErrorKind::DbTransaction,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Entity(entity_error_kind),
            message: None,
        }
    }
}

impl From<events::Error> for Error {
    fn from(err: events::Error) -> Self {
        let notification_error_kind = match &err.error_kind {
            events::EventErrorKind::Subscriber(_) => NotificationErrorKind::Subscriber,
            events::EventErrorKind::Timeout(_) => NotificationErrorKind::Timeout,
        };

        Error {
            message: Some(err.to_string()),
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Notification(notification_error_kind),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Unauthenticated,
            message: Some("Invalid session token.".to_string()),
        }
    }
}
