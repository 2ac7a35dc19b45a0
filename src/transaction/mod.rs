//! Loan and borrow records and the store that keeps them durable.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its field types, and `TransactionBuilder`
//! - The `TransactionStore` that owns the loan and borrow collections
//!   and persists them through a key-value storage collaborator

mod domain;
mod store;

pub use domain::{
    Counterparty, Kind, Priority, ReminderLeadTime, Transaction, TransactionBuilder, TransactionId,
    TransactionState,
};
pub use store::TransactionStore;
