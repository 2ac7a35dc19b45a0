//! Core transaction domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

// ============================================================================
// FIELD TYPES
// ============================================================================

/// Opaque unique identifier for a transaction.
///
/// Assigned by the caller when the record is created and never changed
/// afterwards. IDs are unique across the loan and borrow collections
/// combined.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a transaction ID.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTransactionId] if `id` is an
    /// empty string.
    pub fn new(id: &str) -> Result<Self, Error> {
        if id.is_empty() {
            Err(Error::EmptyTransactionId)
        } else {
            Ok(Self(id.to_string()))
        }
    }

    /// Create a transaction ID without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty counterparty name: the person lent to or
/// borrowed from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Counterparty(String);

impl Counterparty {
    /// Create a counterparty name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCounterparty] if `name` is
    /// empty or contains only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCounterparty)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a counterparty name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for Counterparty {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a transaction is money/items going out (a loan) or coming in
/// (a borrow).
///
/// The kind is fixed at creation and decides which of the two collections
/// holds the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    /// Something you lent to someone else.
    Loan,
    /// Something you borrowed from someone else.
    Borrow,
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Loan => write!(f, "Loan"),
            Kind::Borrow => write!(f, "Borrow"),
        }
    }
}

/// User-set priority of a transaction. Display-only, no ordering semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// The default priority.
    #[default]
    Normal,
    /// Needs attention now.
    Urgent,
    /// Coming up.
    Warning,
}

/// How far before the due date a reminder should fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderLeadTime {
    /// Remind on the due date itself.
    #[default]
    SameDay,
    /// Remind one calendar day before the due date.
    OneDayBefore,
    /// Remind three calendar days before the due date.
    ThreeDaysBefore,
}

/// Lifecycle state of a transaction.
///
/// Every transaction starts out `Ongoing`. The only moves from there are
/// to `Settled` or `Cancelled`, both of which are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    /// The loan or borrow is still outstanding.
    #[default]
    Ongoing,
    /// The money or item came back.
    Settled,
    /// The record was written off.
    Cancelled,
}

impl TransactionState {
    /// Check that moving from this state to `to` is allowed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidStateTransition] if this
    /// state is terminal or if `to` is [TransactionState::Ongoing].
    pub fn transition(self, to: TransactionState) -> Result<TransactionState, Error> {
        match (self, to) {
            (TransactionState::Ongoing, TransactionState::Settled)
            | (TransactionState::Ongoing, TransactionState::Cancelled) => Ok(to),
            (from, to) => Err(Error::InvalidStateTransition { from, to }),
        }
    }
}

impl Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionState::Ongoing => write!(f, "Ongoing"),
            TransactionState::Settled => write!(f, "Settled"),
            TransactionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// A single loan or borrow record.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this record is a loan or a borrow.
    pub kind: Kind,
    /// The person lent to or borrowed from.
    pub counterparty: Counterparty,
    /// What changed hands, as free text, e.g. "20€" or "Harry Potter".
    pub amount_or_item: String,
    /// When the money or item is due back. Any instant, past or future.
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    /// User-set priority for list display.
    pub priority: Priority,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Opaque reference to an attached photo, e.g. a local file URI.
    pub photo_ref: Option<String>,
    /// Whether a reminder notification should be scheduled for this record.
    pub reminder_enabled: bool,
    /// How far before the due date the reminder should fire. Only meaningful
    /// when `reminder_enabled` is set.
    pub reminder_lead_time: ReminderLeadTime,
    /// Lifecycle state. `Ongoing` at creation.
    pub state: TransactionState,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        id: &str,
        kind: Kind,
        counterparty: &str,
        amount_or_item: &str,
        due_date: OffsetDateTime,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: id.to_string(),
            kind,
            counterparty: counterparty.to_string(),
            amount_or_item: amount_or_item.to_string(),
            due_date,
            priority: Priority::default(),
            notes: None,
            photo_ref: None,
            reminder: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The required fields are set up front by [Transaction::build]; the
/// optional ones default to empty. Call [TransactionBuilder::finalize] to
/// validate the inputs and produce the actual [Transaction].
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionBuilder {
    id: String,
    kind: Kind,
    counterparty: String,
    amount_or_item: String,
    due_date: OffsetDateTime,
    priority: Priority,
    notes: Option<String>,
    photo_ref: Option<String>,
    reminder: Option<ReminderLeadTime>,
}

impl TransactionBuilder {
    /// Set the priority for the transaction.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set free-form notes for the transaction.
    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Attach an opaque photo reference to the transaction.
    pub fn photo_ref(mut self, photo_ref: &str) -> Self {
        self.photo_ref = Some(photo_ref.to_string());
        self
    }

    /// Enable a reminder with the given lead time.
    pub fn reminder(mut self, lead_time: ReminderLeadTime) -> Self {
        self.reminder = Some(lead_time);
        self
    }

    /// Validate the inputs and produce the [Transaction].
    ///
    /// The new record is always in the [TransactionState::Ongoing] state.
    ///
    /// # Errors
    ///
    /// This function will return an:
    /// - [Error::EmptyTransactionId] if the ID is an empty string,
    /// - or [Error::EmptyCounterparty] if the counterparty name is empty or
    ///   contains only whitespace.
    pub fn finalize(self) -> Result<Transaction, Error> {
        Ok(Transaction {
            id: TransactionId::new(&self.id)?,
            kind: self.kind,
            counterparty: Counterparty::new(&self.counterparty)?,
            amount_or_item: self.amount_or_item,
            due_date: self.due_date,
            priority: self.priority,
            notes: self.notes,
            photo_ref: self.photo_ref,
            reminder_enabled: self.reminder.is_some(),
            reminder_lead_time: self.reminder.unwrap_or_default(),
            state: TransactionState::Ongoing,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod counterparty_tests {
    use crate::{Error, transaction::Counterparty};

    #[test]
    fn new_fails_on_empty_string() {
        let counterparty = Counterparty::new("");

        assert_eq!(counterparty, Err(Error::EmptyCounterparty));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let counterparty = Counterparty::new("\n\t \r");

        assert_eq!(counterparty, Err(Error::EmptyCounterparty));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let counterparty = Counterparty::new("Paul");

        assert!(counterparty.is_ok());
    }
}

#[cfg(test)]
mod state_tests {
    use crate::{Error, transaction::TransactionState};

    #[test]
    fn ongoing_can_settle() {
        let next = TransactionState::Ongoing.transition(TransactionState::Settled);

        assert_eq!(next, Ok(TransactionState::Settled));
    }

    #[test]
    fn ongoing_can_cancel() {
        let next = TransactionState::Ongoing.transition(TransactionState::Cancelled);

        assert_eq!(next, Ok(TransactionState::Cancelled));
    }

    #[test]
    fn settled_is_terminal() {
        let next = TransactionState::Settled.transition(TransactionState::Ongoing);

        assert_eq!(
            next,
            Err(Error::InvalidStateTransition {
                from: TransactionState::Settled,
                to: TransactionState::Ongoing,
            })
        );
    }

    #[test]
    fn cancelled_is_terminal() {
        let next = TransactionState::Cancelled.transition(TransactionState::Settled);

        assert_eq!(
            next,
            Err(Error::InvalidStateTransition {
                from: TransactionState::Cancelled,
                to: TransactionState::Settled,
            })
        );
    }

    #[test]
    fn reopening_is_not_a_transition() {
        let next = TransactionState::Ongoing.transition(TransactionState::Ongoing);

        assert!(next.is_err());
    }
}
