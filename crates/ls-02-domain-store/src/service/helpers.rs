//! Persistence and audit helpers shared by every mutation.

use tracing::{debug, warn};
use uuid::Uuid;

use super::DomainStoreService;
use crate::adapters::serializer::encode_collection;
use crate::domain::audit::{prepend_bounded, AuditRecord};
use crate::domain::entities::NotificationId;
use crate::domain::errors::PersistenceError;
use crate::domain::value_objects::CollectionKey;
use crate::ports::outbound::{BatchOperation, Clock, KeyValueStore};

impl<KV, C> DomainStoreService<KV, C>
where
    KV: KeyValueStore,
    C: Clock,
{
    /// Encodes one collection in its persisted form.
    pub(crate) fn encode(&self, key: CollectionKey) -> Result<Vec<u8>, PersistenceError> {
        let state = &self.state;
        match key {
            CollectionKey::Accounts => encode_collection(key, &state.accounts),
            CollectionKey::Loans => encode_collection(key, &state.loans),
            CollectionKey::Offers => encode_collection(key, &state.offers),
            CollectionKey::Transactions => encode_collection(key, &state.transactions),
            CollectionKey::ActivityLog => encode_collection(key, &state.activity_log),
            CollectionKey::Notifications => encode_collection(key, &state.notifications),
        }
    }

    /// Writes `keys` in one atomic batch.
    pub(crate) fn try_persist(&mut self, keys: &[CollectionKey]) -> Result<(), PersistenceError> {
        let operations = keys
            .iter()
            .map(|key| Ok(BatchOperation::put(key.as_bytes(), self.encode(*key)?)))
            .collect::<Result<Vec<_>, PersistenceError>>()?;
        self.kv_store.atomic_batch_write(operations)?;
        Ok(())
    }

    /// Writes `keys`, logging instead of failing. The in-memory state is kept
    /// either way.
    pub(crate) fn persist(&mut self, keys: &[CollectionKey]) {
        match self.try_persist(keys) {
            Ok(()) => debug!(collections = ?keys, "Persisted collections"),
            Err(e) => {
                self.persist_failures += 1;
                warn!(
                    collections = ?keys,
                    error = %e,
                    failures = self.persist_failures,
                    "Failed to persist collections; in-memory state kept"
                );
            }
        }
    }

    /// Prepends the activity entry and, when present, the notification.
    /// Returns the audit collections that changed.
    pub(crate) fn record(&mut self, audit: &AuditRecord) -> Vec<CollectionKey> {
        let label = self.clock.time_label();
        let mut touched = vec![CollectionKey::ActivityLog];

        prepend_bounded(
            &mut self.state.activity_log,
            audit.activity_entry(&label),
            self.config.max_activity_entries,
        );

        let id = NotificationId(Uuid::new_v4().to_string());
        if let Some(notification) = audit.notification(id, &label) {
            prepend_bounded(
                &mut self.state.notifications,
                notification,
                self.config.max_notifications,
            );
            touched.push(CollectionKey::Notifications);
        }

        touched
    }

    /// Records the audit trail of a mutation that changed `primary`, then
    /// persists everything it touched in one batch.
    pub(crate) fn commit(&mut self, primary: &[CollectionKey], audit: AuditRecord) {
        let mut keys = primary.to_vec();
        keys.extend(self.record(&audit));
        self.persist(&keys);
    }

    /// Next account, loan or offer id.
    pub(crate) fn next_entity_id(&mut self) -> u64 {
        let now = self.clock.now_millis();
        self.ids.next(now, self.state.max_entity_id())
    }
}
