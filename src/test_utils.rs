#![allow(missing_docs)]
//! Shared fixtures and test doubles for the crate's tests.

use time::macros::datetime;

use crate::{
    Error,
    notification::{NotificationHandle, Notifier, ScheduleRequest},
    transaction::{Kind, Transaction},
};

/// A loan due back on 10 March 2025 at noon UTC, without a reminder.
pub fn sample_loan(id: &str, counterparty: &str, amount_or_item: &str) -> Transaction {
    Transaction::build(
        id,
        Kind::Loan,
        counterparty,
        amount_or_item,
        datetime!(2025-03-10 12:00 UTC),
    )
    .finalize()
    .unwrap()
}

/// A borrow due back on 20 March 2025 at 09:30 UTC, without a reminder.
pub fn sample_borrow(id: &str, counterparty: &str, amount_or_item: &str) -> Transaction {
    Transaction::build(
        id,
        Kind::Borrow,
        counterparty,
        amount_or_item,
        datetime!(2025-03-20 09:30 UTC),
    )
    .finalize()
    .unwrap()
}

/// Remembers every request it is given and issues sequential handles.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub requests: Vec<ScheduleRequest>,
}

impl Notifier for RecordingNotifier {
    fn schedule_one_shot(&mut self, request: &ScheduleRequest) -> Result<NotificationHandle, Error> {
        self.requests.push(request.clone());

        Ok(NotificationHandle::new(&format!(
            "handle-{}",
            self.requests.len()
        )))
    }
}

/// Rejects every request.
#[derive(Debug)]
pub struct RejectingNotifier;

impl Notifier for RejectingNotifier {
    fn schedule_one_shot(&mut self, _request: &ScheduleRequest) -> Result<NotificationHandle, Error> {
        Err(Error::NotificationError("permission not granted".to_string()))
    }
}
