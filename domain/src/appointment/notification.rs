//! Fans an appointment-created event out to subscribers for the user and pet involved.

use super::ResolvedAppointment;
use crate::error::Error;
use events::{Delivery, EntitySubscriber, NotificationEvent, Notifier};
use log::*;
use std::sync::Arc;
use std::time::Duration;

/// Builds one user subscriber and one pet subscriber per appointment and
/// broadcasts a single `APPOINTMENT_CREATED` event to them.
///
/// Each call gets its own [`Notifier`], so subscribers live exactly as long as
/// the broadcast that created them and never leak into later requests.
#[derive(Debug, Clone)]
pub struct NotificationSender {
    dispatch_timeout: Duration,
}

impl NotificationSender {
    pub fn new(dispatch_timeout: Duration) -> Self {
        Self { dispatch_timeout }
    }

    pub async fn send(&self, resolved: &ResolvedAppointment) -> Result<Delivery, Error> {
        info!("Notification Sender: notifying subscribers");

        let notifier = Notifier::new(self.dispatch_timeout);
        notifier
            .subscribe(Arc::new(EntitySubscriber::user(resolved.user.name.clone())))
            .await;
        notifier
            .subscribe(Arc::new(EntitySubscriber::pet(resolved.pet.name.clone())))
            .await;

        let delivery = notifier
            .notify(&NotificationEvent::appointment_created())
            .await?;

        info!("Notification Sender: All notifications sent");
        Ok(delivery)
    }
}

impl Default for NotificationSender {
    fn default() -> Self {
        Self::new(events::notifier::DEFAULT_DISPATCH_TIMEOUT)
    }
}
