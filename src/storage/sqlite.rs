//! Implements a SQLite backed key-value store.

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, storage::KeyValueStore};

/// Stores values in a two-column `kv` table in a SQLite database.
///
/// The mobile platforms the collections came from keep their key-value
/// storage in SQLite, so this is the durable storage implementation.
#[derive(Debug)]
pub struct SqliteStorage {
    connection: Connection,
}

impl SqliteStorage {
    /// Create a store over the SQLite `connection`.
    ///
    /// This function will modify the database by adding the `kv` table if
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if the table could
    /// not be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_kv_table(&connection)?;

        Ok(Self { connection })
    }
}

/// Initialize the kv table.
fn create_kv_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

impl KeyValueStore for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .prepare("SELECT value FROM kv WHERE key = :key")?
            .query_row(&[(":key", &key)], |row| row.get(0))
            .optional()
            .map_err(|error| error.into())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_storage_tests {
    use rusqlite::Connection;

    use crate::{
        storage::KeyValueStore,
        test_utils::sample_loan,
        transaction::{Kind, TransactionStore},
    };

    use super::SqliteStorage;

    fn empty_storage() -> SqliteStorage {
        SqliteStorage::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn get_returns_none_for_unwritten_key() {
        let storage = empty_storage();

        assert_eq!(storage.get("loans"), Ok(None));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut storage = empty_storage();

        storage.set("loans", "[]").unwrap();

        assert_eq!(storage.get("loans"), Ok(Some("[]".to_string())));
    }

    #[test]
    fn set_replaces_the_previous_value() {
        let mut storage = empty_storage();
        storage.set("loans", "old").unwrap();

        storage.set("loans", "new").unwrap();

        assert_eq!(storage.get("loans"), Ok(Some("new".to_string())));
    }

    #[test]
    fn transactions_survive_a_reload_through_the_store() {
        let mut storage = empty_storage();

        {
            let mut store = TransactionStore::new(&mut storage);
            store.load();
            store.upsert(sample_loan("1", "Paul", "10€")).unwrap();
        }

        let mut reloaded = TransactionStore::new(&mut storage);
        reloaded.load();

        let loans = reloaded.list(Kind::Loan);
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].id.as_ref(), "1");
    }
}
