//! The transaction store: owns the loan and borrow collections and keeps
//! them durable through a key-value storage collaborator.

use crate::{
    Error,
    storage::{BORROWS_KEY, KeyValueStore, LOANS_KEY},
    transaction::{Kind, Transaction, TransactionId, TransactionState},
};

/// Holds the two ordered transaction collections and writes every mutation
/// through to the storage collaborator before committing it in memory.
///
/// Insertion order is significant: it is the order records appear in on
/// screen. Each mutation serializes the full target collection and persists
/// it as one value, so a storage failure leaves the in-memory state exactly
/// as it was before the call.
#[derive(Debug)]
pub struct TransactionStore<S> {
    storage: S,
    loans: Vec<Transaction>,
    borrows: Vec<Transaction>,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Create a store over `storage` with both collections empty.
    ///
    /// Call [TransactionStore::load] to read the persisted collections.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            loans: Vec::new(),
            borrows: Vec::new(),
        }
    }

    /// Read both collections from storage, replacing the in-memory state.
    ///
    /// Fails soft: a collection that is missing, unreadable, or unparsable
    /// is replaced by an empty one and logged, never surfaced to the caller.
    pub fn load(&mut self) {
        self.loans = read_collection(&self.storage, LOANS_KEY);
        self.borrows = read_collection(&self.storage, BORROWS_KEY);
    }

    /// Insert `record` into the collection its kind selects, or replace the
    /// existing record with the same ID in place.
    ///
    /// Updates keep the record's position in the list; new records are
    /// appended. Calling this twice with an identical record leaves the
    /// collection in the same state as calling it once.
    ///
    /// Returns the updated collection the record belongs to.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::DuplicateTransactionId] if the ID is taken by a record of
    ///   the other kind,
    /// - or [Error::JsonSerializationError] or [Error::SqlError] if the
    ///   collection could not be persisted. The in-memory collection is
    ///   unchanged in that case.
    pub fn upsert(&mut self, record: Transaction) -> Result<&[Transaction], Error> {
        let kind = record.kind;

        let other = match kind {
            Kind::Loan => &self.borrows,
            Kind::Borrow => &self.loans,
        };
        if other.iter().any(|existing| existing.id == record.id) {
            return Err(Error::DuplicateTransactionId(record.id));
        }

        let mut updated = self.list(kind).to_vec();
        match updated.iter().position(|existing| existing.id == record.id) {
            Some(index) => updated[index] = record,
            None => updated.push(record),
        }

        self.persist(kind, updated)
    }

    /// Remove the record with `id` from the collection for `kind`.
    ///
    /// Removing an ID that is not in the collection is a silent no-op.
    ///
    /// Returns the updated collection.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::JsonSerializationError] or
    /// [Error::SqlError] if the collection could not be persisted. The
    /// in-memory collection is unchanged in that case.
    pub fn remove(&mut self, id: &TransactionId, kind: Kind) -> Result<&[Transaction], Error> {
        let updated: Vec<Transaction> = self
            .list(kind)
            .iter()
            .filter(|existing| &existing.id != id)
            .cloned()
            .collect();

        if updated.len() == self.list(kind).len() {
            return Ok(self.list(kind));
        }

        self.persist(kind, updated)
    }

    /// Move the record with `id` to a new lifecycle state.
    ///
    /// Returns the updated collection.
    ///
    /// # Errors
    ///
    /// This function will return an:
    /// - [Error::NotFound] if no record with `id` exists in the collection,
    /// - [Error::InvalidStateTransition] if the record is already settled or
    ///   cancelled,
    /// - or [Error::JsonSerializationError] or [Error::SqlError] if the
    ///   collection could not be persisted. The in-memory collection is
    ///   unchanged in that case.
    pub fn set_state(
        &mut self,
        id: &TransactionId,
        kind: Kind,
        state: TransactionState,
    ) -> Result<&[Transaction], Error> {
        let mut updated = self.list(kind).to_vec();

        let record = updated
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(Error::NotFound)?;
        record.state = record.state.transition(state)?;

        self.persist(kind, updated)
    }

    /// The current in-memory collection for `kind`, in insertion order.
    pub fn list(&self, kind: Kind) -> &[Transaction] {
        match kind {
            Kind::Loan => &self.loans,
            Kind::Borrow => &self.borrows,
        }
    }

    /// Serialize `updated`, write it through storage, and only then commit
    /// it as the in-memory collection for `kind`.
    fn persist(&mut self, kind: Kind, updated: Vec<Transaction>) -> Result<&[Transaction], Error> {
        let serialized = serde_json::to_string(&updated)?;
        self.storage.set(storage_key(kind), &serialized)?;

        tracing::debug!(
            "persisted {} records under \"{}\"",
            updated.len(),
            storage_key(kind)
        );

        let collection = match kind {
            Kind::Loan => &mut self.loans,
            Kind::Borrow => &mut self.borrows,
        };
        *collection = updated;

        Ok(collection)
    }
}

fn storage_key(kind: Kind) -> &'static str {
    match kind {
        Kind::Loan => LOANS_KEY,
        Kind::Borrow => BORROWS_KEY,
    }
}

fn read_collection<S: KeyValueStore>(storage: &S, key: &str) -> Vec<Transaction> {
    let text = match storage.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!("could not read the \"{key}\" collection, starting empty: {error}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&text) {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!("could not parse the \"{key}\" collection, starting empty: {error}");
            Vec::new()
        }
    }
}
