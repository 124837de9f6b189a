//! In-memory realtime collection backend.
//!
//! This module provides a single-threaded reference implementation of the
//! [`RealtimeCollection`] capability with synchronous snapshot fan-out. Every
//! mutation notifies each live subscriber of the affected collection with the
//! complete current contents, matching the full-replacement delivery contract.
//!
//! The backend is `Clone` (handles share one underlying store), which allows
//! several adapters or test fixtures to observe the same collection the way
//! multiple clients observe one remote store.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::domain::error::Result;
use crate::store::collection::{RawCollection, RealtimeCollection, SnapshotCallback, Subscription};

struct Watcher {
    id: u64,
    collection: String,
    callback: SnapshotCallback,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, RawCollection>,
    watchers: Vec<Watcher>,
    // Ids cancelled while their watcher was temporarily detached during a
    // notification pass; purged lazily.
    cancelled: HashSet<u64>,
    next_watcher_id: u64,
    next_key: u64,
}

/// Shared in-memory store with synchronous snapshot delivery.
///
/// Cloned handles observe and mutate the same collections. Generated keys are
/// unique across all collections of the store.
#[derive(Clone, Default)]
pub struct InMemoryCollection {
    inner: Rc<RefCell<Inner>>,
}

impl InMemoryCollection {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire contents of `collection` and notifies subscribers.
    ///
    /// Models a remote change made by another client: the next delivery is a
    /// full snapshot of the new contents, exactly as the capability contract
    /// requires.
    pub fn replace(&self, collection: &str, entries: RawCollection) {
        self.inner
            .borrow_mut()
            .collections
            .insert(collection.to_string(), entries);
        self.notify(collection);
    }

    /// Number of records currently stored in `collection`.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.inner
            .borrow()
            .collections
            .get(collection)
            .map_or(0, RawCollection::len)
    }

    /// Returns `true` when `collection` holds no records.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn notify(&self, collection: &str) {
        // Detach the watcher list while callbacks run so a callback may
        // subscribe or unsubscribe reentrantly without a RefCell panic.
        let (snapshot, mut detached) = {
            let mut inner = self.inner.borrow_mut();
            let snapshot = inner
                .collections
                .get(collection)
                .cloned()
                .unwrap_or_default();
            let detached = std::mem::take(&mut inner.watchers);
            (snapshot, detached)
        };

        let mut retained = Vec::with_capacity(detached.len());
        for mut watcher in detached.drain(..) {
            let cancelled = self.inner.borrow().cancelled.contains(&watcher.id);
            if cancelled {
                continue;
            }
            if watcher.collection == collection {
                (watcher.callback)(&snapshot);
            }
            retained.push(watcher);
        }

        let mut inner = self.inner.borrow_mut();
        // Watchers registered during the callbacks sit in inner.watchers now;
        // keep them after the pre-existing ones.
        let added = std::mem::take(&mut inner.watchers);
        retained.extend(added);
        let cancelled = std::mem::take(&mut inner.cancelled);
        retained.retain(|w| !cancelled.contains(&w.id));
        inner.watchers = retained;
    }
}

impl RealtimeCollection for InMemoryCollection {
    fn subscribe(&self, collection: &str, mut on_snapshot: SnapshotCallback) -> Subscription {
        let (id, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_watcher_id += 1;
            let id = inner.next_watcher_id;
            let snapshot = inner
                .collections
                .get(collection)
                .cloned()
                .unwrap_or_default();
            (id, snapshot)
        };

        tracing::debug!(collection = %collection, watcher_id = id, "watch established");

        // First delivery happens immediately, before the watcher is live.
        on_snapshot(&snapshot);

        self.inner.borrow_mut().watchers.push(Watcher {
            id,
            collection: collection.to_string(),
            callback: on_snapshot,
        });

        let store = Rc::clone(&self.inner);
        Subscription::new(Box::new(move || {
            let mut inner = store.borrow_mut();
            inner.watchers.retain(|w| w.id != id);
            inner.cancelled.insert(id);
        }))
    }

    fn append(&self, collection: &str, record: serde_json::Value) -> Result<String> {
        let key = {
            let mut inner = self.inner.borrow_mut();
            inner.next_key += 1;
            let key = format!("pin-{:06}", inner.next_key);
            inner
                .collections
                .entry(collection.to_string())
                .or_default()
                .insert(key.clone(), record);
            key
        };

        tracing::debug!(collection = %collection, key = %key, "record appended");
        self.notify(collection);
        Ok(key)
    }
}
