use crate::{Error, EventErrorKind, EventType, NotificationEvent, Subscriber};
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Default upper bound on how long a single subscriber may take to handle an event.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a successful broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub event_type: EventType,
    /// Names of the subscribers that received the event, in delivery order.
    pub recipients: Vec<String>,
}

/// Publish/subscribe hub.
///
/// Subscribers are delivered to sequentially in registration order. The
/// subscriber set lives behind a lock that is held for the whole of a
/// broadcast, so a subscriber registered concurrently with a `notify` call
/// either sees the complete event or none of it.
pub struct Notifier {
    subscribers: Mutex<Vec<Arc<dyn Subscriber>>>,
    dispatch_timeout: Duration,
}

impl Notifier {
    pub fn new(dispatch_timeout: Duration) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            dispatch_timeout,
        }
    }

    /// Register a subscriber. Duplicates are not filtered out.
    pub async fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        debug!("Subscribing {}", subscriber.name());
        self.subscribers.lock().await.push(subscriber);
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Deliver `event` to every current subscriber.
    ///
    /// Stops at the first subscriber that fails or exceeds the dispatch timeout;
    /// subscribers after it are not invoked and the error is returned as is.
    pub async fn notify(&self, event: &NotificationEvent) -> Result<Delivery, Error> {
        let subscribers = self.subscribers.lock().await;
        let mut recipients = Vec::with_capacity(subscribers.len());

        for subscriber in subscribers.iter() {
            match tokio::time::timeout(self.dispatch_timeout, subscriber.receive(event)).await {
                Ok(Ok(())) => recipients.push(subscriber.name().to_owned()),
                Ok(Err(err)) => {
                    warn!("Delivery of {} aborted: {err}", event.event_type());
                    return Err(err);
                }
                Err(_elapsed) => {
                    warn!(
                        "Delivery of {} aborted: {} timed out",
                        event.event_type(),
                        subscriber.name()
                    );
                    return Err(Error {
                        subscriber: subscriber.name().to_owned(),
                        error_kind: EventErrorKind::Timeout(self.dispatch_timeout),
                    });
                }
            }
        }

        debug!(
            "Delivered {} to {} subscriber(s)",
            event.event_type(),
            recipients.len()
        );

        Ok(Delivery {
            event_type: event.event_type(),
            recipients,
        })
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DISPATCH_TIMEOUT)
    }
}
