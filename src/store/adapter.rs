//! Pin store adapter: standing watch, snapshot decoding, and the write path.
//!
//! The adapter owns the boundary between the raw realtime collection and the
//! engine. On every upstream delivery it decodes the entire collection into
//! domain pins, attaches a monotonic sequence number, and hands the resulting
//! [`Snapshot`] to its single registered consumer. It never exposes partial or
//! incremental updates.
//!
//! The adapter does not mutate the store beyond the append path and keeps no
//! pin state of its own; the repository is the canonical holder of the latest
//! snapshot.

use crate::domain::error::Result;
use crate::domain::NewPin;
use crate::store::collection::{RealtimeCollection, Subscription};
use crate::store::records::{decode_collection, PinRecord, Snapshot};

/// Adapter between a [`RealtimeCollection`] backend and the engine.
///
/// Holds the collection name and the live subscription handle. Subscribing a
/// consumer replaces any previous subscription; teardown is idempotent and
/// also happens on drop via the [`Subscription`] handle.
pub struct PinStoreAdapter<C> {
    store: C,
    collection: String,
    subscription: Option<Subscription>,
}

impl<C: RealtimeCollection> PinStoreAdapter<C> {
    /// Creates an adapter over `store`, watching the named collection.
    #[must_use]
    pub fn new(store: C, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            subscription: None,
        }
    }

    /// Establishes the standing watch and registers the snapshot consumer.
    ///
    /// The consumer receives a fully decoded [`Snapshot`] for every upstream
    /// change, including the very first delivery at subscribe time. Sequence
    /// numbers start at 1 and increase by one per delivery; the upstream
    /// snapshots are not inherently sequence-numbered, so the consumer relies
    /// on this attached ordering to discard out-of-order deliveries.
    pub fn subscribe(&mut self, mut consumer: impl FnMut(Snapshot) + 'static) {
        let _span = tracing::debug_span!("store_subscribe", collection = %self.collection).entered();

        self.unsubscribe();

        let mut seq: u64 = 0;
        let subscription = self.store.subscribe(
            &self.collection,
            Box::new(move |raw| {
                seq += 1;
                let pins = decode_collection(raw);
                tracing::debug!(
                    seq = seq,
                    raw_entries = raw.len(),
                    decoded = pins.len(),
                    "snapshot delivered"
                );
                consumer(Snapshot { seq, pins });
            }),
        );
        self.subscription = Some(subscription);
    }

    /// Tears down the standing watch.
    ///
    /// Synchronous and idempotent: calling it twice, or without an active
    /// subscription, is a no-op. No deliveries occur afterwards.
    pub fn unsubscribe(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    /// Returns `true` while the standing watch is active.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Appends a draft pin to the remote collection.
    ///
    /// Resolves once with the generated key. The created pin enters the
    /// canonical pin set only via the next snapshot delivery; the adapter never
    /// inserts it locally.
    ///
    /// # Errors
    ///
    /// Propagates the store failure to the caller. The caller is responsible
    /// for keeping the creation form populated so the user can retry.
    pub fn append(&self, pin: &NewPin) -> Result<String> {
        let _span = tracing::debug_span!("store_append",
            collection = %self.collection,
            category = %pin.category,
        )
        .entered();

        let record = serde_json::to_value(PinRecord::from(pin)).map_err(|e| {
            crate::domain::PindropError::Store(format!("failed to encode pin record: {e}"))
        })?;
        let key = self.store.append(&self.collection, record)?;
        tracing::debug!(key = %key, "pin appended");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::store::memory::InMemoryCollection;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn draft(title: &str) -> NewPin {
        NewPin {
            title: title.to_string(),
            description: "D".to_string(),
            category: Category::Hidden,
            lat: 5.0,
            lng: 5.0,
            user_id: "anonymous-user".to_string(),
            user_name: "User1".to_string(),
            timestamp: 1000,
        }
    }

    #[test]
    fn subscribe_delivers_initial_empty_snapshot() {
        let store = InMemoryCollection::new();
        let mut adapter = PinStoreAdapter::new(store, "pins");
        let delivered: Rc<RefCell<Vec<Snapshot>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&delivered);
        adapter.subscribe(move |snapshot| sink.borrow_mut().push(snapshot));

        let snapshots = delivered.borrow();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].seq, 1);
        assert!(snapshots[0].pins.is_empty());
    }

    #[test]
    fn append_triggers_a_fresh_full_snapshot() {
        let store = InMemoryCollection::new();
        let mut adapter = PinStoreAdapter::new(store, "pins");
        let delivered: Rc<RefCell<Vec<Snapshot>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&delivered);
        adapter.subscribe(move |snapshot| sink.borrow_mut().push(snapshot));

        let key = adapter.append(&draft("First")).unwrap();
        adapter.append(&draft("Second")).unwrap();

        let snapshots = delivered.borrow();
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[1].seq, 2);
        assert_eq!(snapshots[1].pins.len(), 1);
        assert_eq!(snapshots[1].pins[0].id, key);
        assert_eq!(snapshots[2].seq, 3);
        assert_eq!(snapshots[2].pins.len(), 2);
    }

    #[test]
    fn no_deliveries_after_unsubscribe() {
        let store = InMemoryCollection::new();
        let mut adapter = PinStoreAdapter::new(store, "pins");
        let delivered: Rc<RefCell<Vec<Snapshot>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&delivered);
        adapter.subscribe(move |snapshot| sink.borrow_mut().push(snapshot));
        assert!(adapter.is_subscribed());

        adapter.unsubscribe();
        adapter.unsubscribe();
        assert!(!adapter.is_subscribed());

        adapter.append(&draft("After teardown")).unwrap();
        assert_eq!(delivered.borrow().len(), 1);
    }
}
