//! Pluggable key-value persistence for the transaction collections.
//!
//! The transaction store reads and writes two fixed keys, one per
//! collection, each holding a JSON array of transaction records. Two
//! implementations are provided: [SqliteStorage] for durable on-device
//! storage and [MemoryStorage] for tests and callers that want ephemeral
//! state.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::Error;

/// The storage key holding the serialized loan collection.
pub const LOANS_KEY: &str = "loans";

/// The storage key holding the serialized borrow collection.
pub const BORROWS_KEY: &str = "borrows";

/// A key-value storage collaborator.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` if the key has never been written.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if the underlying
    /// storage could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if the underlying
    /// storage could not be written. The previous value is kept in that
    /// case.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

impl<S: KeyValueStore> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }
}
