//! The notifier collaborator interface and the request handed to it.

use time::OffsetDateTime;

use crate::{Error, transaction::TransactionId};

/// A one-shot notification for the platform notifier to deliver later.
///
/// Built by [reminder::schedule](crate::reminder::schedule). The core hands
/// the request over and forgets about it: cancelling or replacing an
/// earlier request for the same transaction when a record is edited or
/// deleted is the caller's responsibility.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleRequest {
    /// When the notification should fire.
    pub trigger_at: OffsetDateTime,
    /// Short heading shown to the user.
    pub title: String,
    /// Message text composed from the record's details.
    pub body: String,
    /// The ID of the transaction the reminder is for.
    pub correlation_id: TransactionId,
}

/// An opaque identifier for a scheduled notification, issued by the
/// platform.
///
/// Callers that want to cancel a reminder later need to hold on to this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationHandle(String);

impl NotificationHandle {
    /// Wrap a platform-issued notification identifier.
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for NotificationHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A platform notification collaborator.
pub trait Notifier {
    /// Ask the platform to deliver a notification at `request.trigger_at`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NotificationError] if the
    /// platform rejected the request.
    fn schedule_one_shot(&mut self, request: &ScheduleRequest) -> Result<NotificationHandle, Error>;
}

impl<N: Notifier> Notifier for &mut N {
    fn schedule_one_shot(&mut self, request: &ScheduleRequest) -> Result<NotificationHandle, Error> {
        (**self).schedule_one_shot(request)
    }
}
