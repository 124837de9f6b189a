//! Application state: the canonical pin set merged with local UI state.
//!
//! This module defines [`AppState`], the central state container for the
//! engine: the pin repository plus the three independent local flags
//! (selection, draft location, form visibility), the active filter, and the
//! last resolved device position. It is the single source of truth the view
//! composer derives from.
//!
//! # State Components
//!
//! - **Repository**: latest accepted snapshot of the remote pin collection
//! - **Selection**: weak reference (by id) to the pin focused for detail display
//! - **Draft location**: transient coordinate staged for a new pin
//! - **Form visibility**: whether the creation form is shown
//! - **Filter**: category predicate applied to the rendered pin set
//! - **User position**: device position, if a locate-me request resolved
//!
//! Selection is a reference into the current pin set, never ownership: if the
//! referenced pin disappears from a snapshot, resolution yields "not found"
//! rather than a stale object.

use crate::app::modes::PinFilter;
use crate::app::repository::PinRepository;
use crate::domain::{MapPosition, Pin};
use crate::view::viewmodel::{compose, MapViewModel};

/// Central state container for the engine.
///
/// Mutated exclusively by the event handler in response to store deliveries,
/// user input, and capability results. View models are computed on demand from
/// state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Canonical pin set, replaced wholesale on every accepted snapshot.
    pub repository: PinRepository,

    /// Id of the pin focused for detail display, if any.
    ///
    /// A weak reference: resolution through [`selected_pin`](Self::selected_pin)
    /// returns `None` once the id is absent from the latest snapshot, and the
    /// handler clears the field on such a snapshot.
    pub selected_pin_id: Option<String>,

    /// Map coordinate staged for a new pin, pending form submission.
    ///
    /// Set by a map-click, cleared on form close (cancel or successful
    /// submit). Never persisted.
    pub draft_location: Option<MapPosition>,

    /// Whether the creation form is shown.
    ///
    /// Opened by a map-click (together with the draft location) or by the
    /// explicit add-pin action (possibly without a draft yet).
    pub form_visible: bool,

    /// Active category filter for the rendered pin set.
    pub filter: PinFilter,

    /// Last resolved device position, if any.
    pub user_position: Option<MapPosition>,

    /// Opaque author identifier attached to created pins.
    pub user_id: String,

    /// Author display name attached to created pins.
    pub user_name: String,
}

impl AppState {
    /// Creates an initial state with an empty pin set and the given author
    /// identity.
    #[must_use]
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            repository: PinRepository::new(),
            selected_pin_id: None,
            draft_location: None,
            form_visible: false,
            filter: PinFilter::All,
            user_position: None,
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }

    /// Resolves the selection against the current pin set.
    ///
    /// Returns `None` when nothing is selected or the selected id no longer
    /// exists in the latest snapshot, so a stale pin is never rendered.
    #[must_use]
    pub fn selected_pin(&self) -> Option<&Pin> {
        self.selected_pin_id
            .as_deref()
            .and_then(|id| self.repository.find(id))
    }

    /// Clears the selection if its id is absent from the latest snapshot.
    ///
    /// Called by the handler after every accepted snapshot. Returns `true`
    /// when a dangling selection was cleared.
    pub fn prune_selection(&mut self) -> bool {
        let dangling = self
            .selected_pin_id
            .as_deref()
            .is_some_and(|id| !self.repository.contains(id));
        if dangling {
            tracing::debug!(
                pin_id = ?self.selected_pin_id,
                "selected pin vanished from snapshot, clearing selection"
            );
            self.selected_pin_id = None;
        }
        dangling
    }

    /// Stages a draft location and opens the creation form atomically.
    ///
    /// The map-click entry path: form visibility is `true` only together with
    /// a non-null draft when entered this way.
    pub fn open_form_at(&mut self, position: MapPosition) {
        self.draft_location = Some(position);
        self.form_visible = true;
    }

    /// Closes the creation form and discards the draft location.
    ///
    /// Used for both cancel and successful submit; the no-optimistic-update
    /// policy means the created pin arrives via the next snapshot regardless.
    pub fn close_form(&mut self) {
        self.form_visible = false;
        self.draft_location = None;
    }

    /// Computes the renderable view model from the current state.
    ///
    /// Pure derivation: filtered pins plus the optional user-position marker,
    /// the info overlay for the resolved selection, and the camera.
    #[must_use]
    pub fn compute_viewmodel(&self) -> MapViewModel {
        let pins = self.repository.filtered_pins(self.filter);
        compose(&pins, self.selected_pin(), self.user_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::store::Snapshot;

    fn pin(id: &str) -> Pin {
        Pin {
            id: id.to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            category: Category::Landmark,
            lat: 1.0,
            lng: 2.0,
            user_id: "anonymous-user".to_string(),
            user_name: "User1".to_string(),
            timestamp: 1000,
        }
    }

    fn state_with(ids: &[&str]) -> AppState {
        let mut state = AppState::new("anonymous-user", "User1");
        state.repository.apply_snapshot(Snapshot {
            seq: 1,
            pins: ids.iter().map(|id| pin(id)).collect(),
        });
        state
    }

    #[test]
    fn selection_resolves_against_current_pins() {
        let mut state = state_with(&["a", "b"]);
        state.selected_pin_id = Some("b".to_string());
        assert_eq!(state.selected_pin().unwrap().id, "b");
    }

    #[test]
    fn dangling_selection_resolves_to_none_and_is_pruned() {
        let mut state = state_with(&["a"]);
        state.selected_pin_id = Some("gone".to_string());
        assert!(state.selected_pin().is_none());

        assert!(state.prune_selection());
        assert!(state.selected_pin_id.is_none());
        assert!(!state.prune_selection());
    }

    #[test]
    fn map_click_entry_couples_draft_and_form() {
        let mut state = AppState::new("anonymous-user", "User1");
        state.open_form_at(MapPosition::new(5.0, 5.0));
        assert!(state.form_visible);
        assert_eq!(state.draft_location, Some(MapPosition::new(5.0, 5.0)));

        state.close_form();
        assert!(!state.form_visible);
        assert!(state.draft_location.is_none());
    }
}
