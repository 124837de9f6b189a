//! Realtime collection capability abstraction.
//!
//! This module defines the [`RealtimeCollection`] trait that abstracts over the
//! remote pin store. The capability is snapshot-oriented: a subscriber receives
//! the complete raw collection on every upstream change, never a diff. This
//! allows swapping store backends without touching the synchronization logic.
//!
//! # Design Philosophy
//!
//! The trait is minimal and mirrors exactly the operations the engine needs:
//! a standing watch and an append. There is no query surface, no update, and
//! no delete; pins are create-only and the subscription round-trip is the sole
//! consistency mechanism.

use std::collections::BTreeMap;

use crate::domain::error::Result;

/// Raw upstream representation of a pin collection.
///
/// A mapping from store-generated key to an undecoded field bag. A missing or
/// empty upstream collection is represented by an empty map, never by an
/// absent value.
pub type RawCollection = BTreeMap<String, serde_json::Value>;

/// Callback invoked with the full raw collection on every upstream change.
pub type SnapshotCallback = Box<dyn FnMut(&RawCollection)>;

/// Abstraction over a realtime, snapshot-delivering record store.
///
/// Implementations must deliver the complete collection to each subscriber on
/// every change, including an initial delivery at subscribe time, and must
/// stop delivering once the returned [`Subscription`] is cancelled.
///
/// # Implementations
///
/// - [`InMemoryCollection`](crate::store::InMemoryCollection): single-threaded
///   reference backend with synchronous fan-out.
pub trait RealtimeCollection {
    /// Establishes a standing watch on `collection`.
    ///
    /// The callback is invoked immediately with the current contents (an empty
    /// map if the collection does not exist yet) and again after every change.
    /// Deliveries stop deterministically once the returned handle is cancelled
    /// or dropped.
    fn subscribe(&self, collection: &str, on_snapshot: SnapshotCallback) -> Subscription;

    /// Appends a record to `collection` and returns its generated key.
    ///
    /// Resolves exactly once: either with the key or with an error. A failed
    /// append must not partially mutate the collection.
    ///
    /// # Errors
    ///
    /// Returns [`PindropError::Store`](crate::domain::PindropError::Store) if
    /// the write is rejected or the store is unreachable.
    fn append(&self, collection: &str, record: serde_json::Value) -> Result<String>;
}

/// Handle tearing down a standing watch.
///
/// Cancellation is synchronous and idempotent: calling [`unsubscribe`] twice,
/// or after the handle has already been dropped, is a no-op. Dropping the
/// handle cancels the watch, so a consumer cannot leak callbacks that mutate
/// state after it is gone.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps a one-shot cancellation closure.
    #[must_use]
    pub fn new(cancel: Box<dyn FnOnce()>) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }

    /// Tears down the watch. Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            tracing::debug!("cancelling collection subscription");
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn unsubscribe_is_idempotent() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&cancelled);
        let mut subscription = Subscription::new(Box::new(move || {
            counter.set(counter.get() + 1);
        }));

        subscription.unsubscribe();
        subscription.unsubscribe();
        drop(subscription);

        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn drop_cancels_the_watch() {
        let cancelled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&cancelled);
        {
            let _subscription = Subscription::new(Box::new(move || {
                counter.set(counter.get() + 1);
            }));
        }
        assert_eq!(cancelled.get(), 1);
    }
}
