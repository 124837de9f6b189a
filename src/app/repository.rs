//! Canonical pin set with full-replace snapshot semantics.
//!
//! The repository holds the latest full pin list as delivered by the store
//! adapter. Every accepted delivery completely supersedes the previous list;
//! nothing is ever merged, and no locally created pin is inserted optimistically.
//! Last-snapshot-wins is the entire consistency model.

use crate::app::modes::PinFilter;
use crate::domain::Pin;
use crate::store::Snapshot;

/// Holder of the canonical in-process pin set.
///
/// Tracks the highest applied sequence number so an older snapshot delivered
/// after a newer one is discarded rather than rolling the visible state back.
#[derive(Debug, Clone, Default)]
pub struct PinRepository {
    pins: Vec<Pin>,
    last_seq: u64,
}

impl PinRepository {
    /// Creates an empty repository; `current_pins` is empty before the first
    /// accepted delivery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a snapshot, fully replacing the pin set.
    ///
    /// Returns `true` when the snapshot was accepted. A snapshot whose sequence
    /// is not strictly newer than the last applied one is stale and discarded
    /// with a debug log; the visible state stays at the fresher content.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> bool {
        if snapshot.seq <= self.last_seq {
            tracing::debug!(
                seq = snapshot.seq,
                last_seq = self.last_seq,
                "discarding stale snapshot"
            );
            return false;
        }

        tracing::debug!(
            seq = snapshot.seq,
            pin_count = snapshot.pins.len(),
            "snapshot applied"
        );
        self.last_seq = snapshot.seq;
        self.pins = snapshot.pins;
        true
    }

    /// The latest known pin list, in source order.
    #[must_use]
    pub fn current_pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Filtered projection of the pin set.
    ///
    /// Pure and deterministic: the identity projection under
    /// [`PinFilter::All`], category equality otherwise, preserving the
    /// relative order of the source list.
    #[must_use]
    pub fn filtered_pins(&self, filter: PinFilter) -> Vec<&Pin> {
        self.pins.iter().filter(|pin| filter.matches(pin)).collect()
    }

    /// Looks a pin up by its store key.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.id == id)
    }

    /// Returns `true` when a pin with the given key is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Sequence number of the last accepted snapshot (0 before the first).
    #[must_use]
    pub const fn last_seq(&self) -> u64 {
        self.last_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn pin(id: &str, category: Category) -> Pin {
        Pin {
            id: id.to_string(),
            title: format!("title-{id}"),
            description: format!("description-{id}"),
            category,
            lat: 10.0,
            lng: 20.0,
            user_id: "anonymous-user".to_string(),
            user_name: "User1".to_string(),
            timestamp: 1000,
        }
    }

    #[test]
    fn snapshot_fully_replaces_previous_content() {
        let mut repository = PinRepository::new();
        repository.apply_snapshot(Snapshot {
            seq: 1,
            pins: vec![pin("a", Category::Food), pin("b", Category::Landmark)],
        });
        repository.apply_snapshot(Snapshot {
            seq: 2,
            pins: vec![pin("c", Category::Hidden)],
        });

        let ids: Vec<&str> = repository.current_pins().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn stale_snapshot_is_discarded() {
        let mut repository = PinRepository::new();
        assert!(repository.apply_snapshot(Snapshot {
            seq: 2,
            pins: vec![pin("newer", Category::Food)],
        }));
        assert!(!repository.apply_snapshot(Snapshot {
            seq: 1,
            pins: vec![pin("older", Category::Food)],
        }));

        assert_eq!(repository.current_pins().len(), 1);
        assert_eq!(repository.current_pins()[0].id, "newer");
        assert_eq!(repository.last_seq(), 2);
    }

    #[test]
    fn filter_all_is_the_identity() {
        let mut repository = PinRepository::new();
        repository.apply_snapshot(Snapshot {
            seq: 1,
            pins: vec![
                pin("a", Category::Food),
                pin("b", Category::Landmark),
                pin("c", Category::Food),
            ],
        });

        let filtered = repository.filtered_pins(PinFilter::All);
        let all: Vec<&Pin> = repository.current_pins().iter().collect();
        assert_eq!(filtered, all);
    }

    #[test]
    fn category_filter_is_an_order_preserving_subset() {
        let mut repository = PinRepository::new();
        repository.apply_snapshot(Snapshot {
            seq: 1,
            pins: vec![
                pin("a", Category::Food),
                pin("b", Category::Landmark),
                pin("c", Category::Food),
                pin("d", Category::Activity),
            ],
        });

        for category in Category::ALL {
            let filtered = repository.filtered_pins(PinFilter::Category(category));
            assert!(filtered.iter().all(|p| p.category == category));
        }

        let food: Vec<&str> = repository
            .filtered_pins(PinFilter::Category(Category::Food))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(food, vec!["a", "c"]);
    }

    #[test]
    fn empty_before_first_delivery() {
        let repository = PinRepository::new();
        assert!(repository.current_pins().is_empty());
        assert!(repository.filtered_pins(PinFilter::Category(Category::Food)).is_empty());
    }
}
