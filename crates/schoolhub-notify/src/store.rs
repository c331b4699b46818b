//! Notification store, the single writer of the notification list.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use schoolhub_core::config::notifications::NotificationsConfig;
use schoolhub_core::traits::storage::KeyValueStore;
use schoolhub_core::types::id::NotificationId;

use crate::record::{NewNotification, NotificationKind, NotificationRecord, wire};

/// Immutable view of the list, newest first.
pub type Snapshot = Arc<Vec<NotificationRecord>>;

/// Owns the canonical notification list and mirrors it to durable storage.
///
/// Every mutation is serialized behind one lock, written through to the
/// backend under `storage_key`, and then published to subscribers as a new
/// [`Snapshot`]. No operation returns an error: persistence failures are
/// logged and the in-memory list stays authoritative.
#[derive(Debug)]
pub struct NotificationStore {
    /// Durable backend.
    backend: Arc<dyn KeyValueStore>,
    /// Key the serialized list is stored under.
    storage_key: String,
    /// Working copy; holding this lock makes a mutation exclusive.
    records: Mutex<Vec<NotificationRecord>>,
    /// Latest published snapshot.
    snapshot: watch::Sender<Snapshot>,
}

impl NotificationStore {
    /// Create a store, rehydrating the list from `backend`.
    ///
    /// A missing key, a backend error, or a malformed payload all start the
    /// store with an empty list. Ids assigned while loading (records without
    /// one, or repeats of an earlier id) are written back so they stay stable
    /// across loads.
    pub async fn load(backend: Arc<dyn KeyValueStore>, config: &NotificationsConfig) -> Self {
        let (records, assigned) = rehydrate(backend.as_ref(), &config.storage_key).await;
        info!(
            count = records.len(),
            assigned,
            provider = backend.provider_type(),
            "Notification store loaded"
        );

        let (snapshot, _) = watch::channel(Arc::new(records.clone()));
        let store = Self {
            backend,
            storage_key: config.storage_key.clone(),
            records: Mutex::new(records),
            snapshot,
        };
        if assigned > 0 {
            let list = store.records.lock().await;
            store.persist(&list).await;
        }
        store
    }

    /// Create a notification and return its id.
    ///
    /// A supplied id that is already in the list is replaced with a fresh
    /// one so ids stay unique; the store does no other deduplication.
    pub async fn create(&self, payload: NewNotification) -> NotificationId {
        let mut record = payload.normalize(Utc::now());
        self.mutate(move |list| {
            if list.iter().any(|r| r.id == record.id) {
                let fresh = NotificationId::generate();
                warn!(requested = %record.id, assigned = %fresh, "Notification id already in use");
                record.id = fresh;
            }
            debug!(id = %record.id, kind = %record.kind, "Notification created");
            let id = record.id.clone();
            list.insert(0, record);
            (true, id)
        })
        .await
    }

    /// Remove the notification with the given id. Unknown ids are ignored.
    pub async fn remove(&self, id: &str) {
        self.mutate(|list| {
            let before = list.len();
            list.retain(|r| r.id != id);
            let removed = list.len() != before;
            if removed {
                debug!(id, "Notification removed");
            }
            (removed, ())
        })
        .await
    }

    /// Mark one notification as read. Unknown ids are ignored.
    pub async fn mark_read(&self, id: &str) {
        self.mutate(|list| {
            let changed = list
                .iter_mut()
                .find(|r| r.id == id)
                .map(|r| !std::mem::replace(&mut r.read, true))
                .unwrap_or(false);
            (changed, ())
        })
        .await
    }

    /// Mark every notification as read. Returns how many were unread.
    pub async fn mark_all_read(&self) -> usize {
        self.mutate(|list| {
            let count = mark_where(list, |_| true);
            (count > 0, count)
        })
        .await
    }

    /// Mark every notification pointing at `reference_id` as read, limited
    /// to `kind` when given. An empty reference id does nothing.
    ///
    /// Returns how many records changed.
    pub async fn mark_by_reference(&self, reference_id: &str, kind: Option<&NotificationKind>) -> usize {
        if reference_id.is_empty() {
            return 0;
        }
        self.mutate(|list| {
            let count = mark_where(list, |r| {
                r.references(reference_id) && kind.is_none_or(|k| &r.kind == k)
            });
            if count > 0 {
                debug!(reference_id, count, "Notifications marked read by reference");
            }
            (count > 0, count)
        })
        .await
    }

    /// Remove every notification.
    pub async fn clear_all(&self) {
        self.mutate(|list| {
            let changed = !list.is_empty();
            list.clear();
            (changed, ())
        })
        .await
    }

    /// Count unread notifications, optionally of one kind.
    pub fn unread_count(&self, kind: Option<&NotificationKind>) -> usize {
        self.snapshot
            .borrow()
            .iter()
            .filter(|r| r.is_unread() && kind.is_none_or(|k| &r.kind == k))
            .count()
    }

    /// Current list, newest first.
    pub fn records(&self) -> Snapshot {
        Arc::clone(&self.snapshot.borrow())
    }

    /// Look up one notification.
    pub fn get(&self, id: &str) -> Option<NotificationRecord> {
        self.snapshot.borrow().iter().find(|r| r.id == id).cloned()
    }

    /// Number of stored notifications.
    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// Subscribe to list changes. The receiver always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Apply `op` exclusively. When it reports a change, the list is
    /// persisted and then published before the call returns.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Vec<NotificationRecord>) -> (bool, T)) -> T {
        let mut list = self.records.lock().await;
        let (changed, out) = op(&mut list);
        if changed {
            self.persist(&list).await;
            self.snapshot.send_replace(Arc::new(list.clone()));
        }
        out
    }

    async fn persist(&self, list: &[NotificationRecord]) {
        let json = match wire::encode_list(list) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize notifications");
                return;
            }
        };
        if let Err(e) = self.backend.set(&self.storage_key, &json).await {
            warn!(key = %self.storage_key, error = %e, "Failed to persist notifications");
        }
    }
}

/// Set `read` on every unread record matching `pred`; return how many changed.
fn mark_where(list: &mut [NotificationRecord], pred: impl Fn(&NotificationRecord) -> bool) -> usize {
    let mut count = 0;
    for record in list.iter_mut().filter(|r| !r.read && pred(r)) {
        record.read = true;
        count += 1;
    }
    count
}

/// Read the persisted list. Also returns how many records were given a
/// new id.
async fn rehydrate(backend: &dyn KeyValueStore, key: &str) -> (Vec<NotificationRecord>, usize) {
    let raw = match backend.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return (Vec::new(), 0),
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted notifications");
            return (Vec::new(), 0);
        }
    };

    let now = Utc::now();
    let mut seen = HashSet::new();
    let mut assigned = 0;
    let records = wire::decode_list(&raw)
        .into_iter()
        .map(|payload| {
            let had_id = payload.id.as_ref().is_some_and(|id| !id.is_empty());
            let mut record = payload.normalize(now);
            if !seen.insert(record.id.clone()) {
                record.id = NotificationId::generate();
                seen.insert(record.id.clone());
                assigned += 1;
            } else if !had_id {
                assigned += 1;
            }
            record
        })
        .collect();
    (records, assigned)
}
