//! The composition root: wires the storage, store, and notifier
//! collaborators together and runs the control flow in between.

use time::OffsetDateTime;
use time_tz::{Offset, TimeZone};

use crate::{
    Error,
    notification::Notifier,
    reminder,
    storage::KeyValueStore,
    transaction::{Kind, Transaction, TransactionId, TransactionState, TransactionStore},
};

/// Owns the transaction store and the notifier and routes every mutation
/// through them: persist first, then schedule a reminder when the record
/// asks for one.
///
/// Due dates are converted to the configured timezone before the trigger
/// instant is computed, so "one day before" means one calendar day in the
/// user's local time.
#[derive(Debug)]
pub struct App<S, N> {
    store: TransactionStore<S>,
    notifier: N,
    timezone: String,
}

impl<S, N> App<S, N>
where
    S: KeyValueStore,
    N: Notifier,
{
    /// Create an app over the given collaborators.
    ///
    /// `canonical_timezone` is a name such as "Europe/Paris". A name the
    /// timezone database does not know is logged when a reminder is
    /// scheduled and due dates are then used as given.
    ///
    /// Call [App::load] once at startup to read the persisted collections.
    pub fn new(storage: S, notifier: N, canonical_timezone: &str) -> Self {
        Self {
            store: TransactionStore::new(storage),
            notifier,
            timezone: canonical_timezone.to_string(),
        }
    }

    /// Read the persisted collections, replacing the in-memory state.
    pub fn load(&mut self) {
        self.store.load();
    }

    /// The current collection for `kind`, in insertion order.
    pub fn list(&self, kind: Kind) -> &[Transaction] {
        self.store.list(kind)
    }

    /// Create or update `record`, then schedule its reminder if enabled.
    ///
    /// The record is persisted first; a reminder that cannot be scheduled
    /// is logged and does not undo the write. Replacing a reminder that was
    /// scheduled for an earlier version of the record is the caller's
    /// responsibility, using the handle it got back from its notifier.
    ///
    /// Returns the updated collection the record belongs to.
    ///
    /// # Errors
    ///
    /// Same as [TransactionStore::upsert].
    pub fn upsert(&mut self, record: Transaction) -> Result<&[Transaction], Error> {
        let kind = record.kind;
        let reminder_copy = record.clone();

        self.store.upsert(record)?;
        self.schedule_reminder(reminder_copy);

        Ok(self.store.list(kind))
    }

    /// Remove the record with `id` from the collection for `kind`.
    ///
    /// A reminder already scheduled for the record is not cancelled here;
    /// the caller holds the notification handle.
    ///
    /// # Errors
    ///
    /// Same as [TransactionStore::remove].
    pub fn remove(&mut self, id: &TransactionId, kind: Kind) -> Result<&[Transaction], Error> {
        self.store.remove(id, kind)
    }

    /// Move the record with `id` to a new lifecycle state.
    ///
    /// # Errors
    ///
    /// Same as [TransactionStore::set_state].
    pub fn set_state(
        &mut self,
        id: &TransactionId,
        kind: Kind,
        state: TransactionState,
    ) -> Result<&[Transaction], Error> {
        self.store.set_state(id, kind, state)
    }

    fn schedule_reminder(&mut self, mut record: Transaction) {
        let timezone = time_tz::timezones::get_by_name(&self.timezone);

        if timezone.is_none() {
            tracing::warn!(
                "unknown timezone \"{}\", using the due date as given",
                self.timezone
            );
        }

        if let Some(tz) = timezone {
            let offset = tz.get_offset_utc(&record.due_date).to_utc();
            record.due_date = record.due_date.to_offset(offset);
        }

        let Some(mut request) = reminder::schedule(&record, OffsetDateTime::now_utc()) else {
            return;
        };

        // Daylight saving may start or end between the trigger and the due
        // date. Keep the local wall time by re-resolving the offset at the
        // trigger instant.
        if let Some(tz) = timezone {
            let offset = tz.get_offset_utc(&request.trigger_at).to_utc();

            if offset != request.trigger_at.offset() {
                request.trigger_at = request.trigger_at.replace_offset(offset);
            }
        }

        match self.notifier.schedule_one_shot(&request) {
            Ok(handle) => tracing::debug!(
                "scheduled reminder {} for transaction \"{}\"",
                handle.as_ref(),
                record.id
            ),
            Err(error) => tracing::warn!(
                "could not schedule the reminder for transaction \"{}\": {error}",
                record.id
            ),
        }
    }
}
