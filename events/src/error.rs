//! Error types for event delivery.
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub struct Error {
    /// Name of the subscriber whose dispatch failed
    pub subscriber: String,
    pub error_kind: EventErrorKind,
}

#[derive(Debug, PartialEq)]
pub enum EventErrorKind {
    /// The subscriber reported a failure while handling the event
    Subscriber(String),
    /// The subscriber did not finish handling the event within the dispatch timeout
    Timeout(Duration),
}

impl Error {
    pub fn subscriber(subscriber: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subscriber: subscriber.into(),
            error_kind: EventErrorKind::Subscriber(reason.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            EventErrorKind::Subscriber(reason) => {
                write!(f, "Subscriber {} failed: {reason}", self.subscriber)
            }
            EventErrorKind::Timeout(timeout) => write!(
                f,
                "Subscriber {} timed out after {}ms",
                self.subscriber,
                timeout.as_millis()
            ),
        }
    }
}

impl StdError for Error {}
