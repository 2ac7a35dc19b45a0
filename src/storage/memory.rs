//! Implements an in-memory key-value store.

use std::collections::HashMap;

use crate::{Error, storage::KeyValueStore};

/// Stores values in a `HashMap`.
///
/// Contents are lost when the store is dropped, so this is only suitable
/// for tests and callers that do not need their collections to survive a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod memory_storage_tests {
    use crate::storage::KeyValueStore;

    use super::MemoryStorage;

    #[test]
    fn get_returns_none_for_unwritten_key() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("loans"), Ok(None));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut storage = MemoryStorage::new();

        storage.set("loans", "[]").unwrap();

        assert_eq!(storage.get("loans"), Ok(Some("[]".to_string())));
    }

    #[test]
    fn set_replaces_the_previous_value() {
        let mut storage = MemoryStorage::new();
        storage.set("loans", "old").unwrap();

        storage.set("loans", "new").unwrap();

        assert_eq!(storage.get("loans"), Ok(Some("new".to_string())));
    }
}
