//! Lendlog is the record-keeping and reminder core of a small app for
//! tracking informal personal loans and borrows: who you lent money or
//! things to, who you borrowed from, and when each of those is due back.
//!
//! The crate owns two ordered collections of [Transaction] records (one
//! for loans, one for borrows), keeps them durable through a pluggable
//! [storage::KeyValueStore], and computes one-shot reminder requests for
//! a pluggable [notification::Notifier]. Screens, navigation, and
//! permission prompts live in the embedding application, which drives
//! this crate through [App].

#![warn(missing_docs)]

pub mod app;
pub mod notification;
pub mod reminder;
pub mod storage;
pub mod transaction;

#[cfg(test)]
pub mod test_utils;

pub use app::App;
pub use notification::{NotificationHandle, Notifier, ScheduleRequest};
pub use transaction::{
    Counterparty, Kind, Priority, ReminderLeadTime, Transaction, TransactionId, TransactionState,
    TransactionStore,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only string was used as a counterparty name.
    #[error("counterparty name cannot be empty")]
    EmptyCounterparty,

    /// An empty string was used as a transaction ID.
    #[error("transaction ID cannot be empty")]
    EmptyTransactionId,

    /// The record's ID is already taken by a record of the other kind.
    ///
    /// IDs are unique across the loan and borrow collections combined, and
    /// a record's kind never changes after creation. Callers that hit this
    /// error are reusing an ID rather than editing an existing record.
    #[error("a transaction with ID \"{0}\" already exists in the other collection")]
    DuplicateTransactionId(TransactionId),

    /// No transaction with the given ID exists in the targeted collection.
    #[error("a transaction with the given ID could not be found")]
    NotFound,

    /// The requested state change is not allowed.
    ///
    /// Settled and cancelled transactions are terminal and cannot change
    /// state again.
    #[error("cannot change a transaction's state from {from} to {to}")]
    InvalidStateTransition {
        /// The state the transaction is currently in.
        from: TransactionState,
        /// The state the caller asked for.
        to: TransactionState,
    },

    /// An unexpected SQL error from the storage collaborator.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(#[from] rusqlite::Error),

    /// A collection could not be serialized as JSON before persisting it.
    #[error("could not serialize as JSON: {0}")]
    JsonSerializationError(String),

    /// The notifier collaborator rejected a schedule request.
    #[error("the notification could not be scheduled: {0}")]
    NotificationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JsonSerializationError(value.to_string())
    }
}
