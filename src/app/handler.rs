//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes store
//! deliveries, user input, and capability results, translating them into state
//! changes and action sequences. All mutation in the engine happens here, in
//! reaction to exactly one of the external event kinds.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the render surface, the store subscription, or a
//!    capability completion
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Store**: `SnapshotDelivered`
//! - **Map surface**: `MapClick`, `MarkerClick`, `CloseInfo`
//! - **Controls/form**: `OpenForm`, `CancelForm`, `SubmitForm`,
//!   `FilterChanged`, `LocateMe`
//! - **Capability completions**: `PositionResolved`, `PositionFailed`,
//!   `PinWritten`, `PinWriteFailed`

use crate::app::modes::PinFilter;
use crate::app::{Action, AppState, Notice};
use crate::domain::error::Result;
use crate::domain::{Category, MapPosition, NewPin};
use crate::geo::PositionError;
use crate::store::Snapshot;

/// Events triggered by store deliveries, user input, or capability results.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes them sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A decoded full-collection snapshot arrived from the store adapter.
    ///
    /// Replaces the canonical pin set when the attached sequence is fresher
    /// than the last applied one; discarded otherwise. An accepted snapshot
    /// also prunes a selection whose pin no longer exists.
    SnapshotDelivered(Snapshot),

    /// The user clicked an empty spot on the map.
    ///
    /// Stages the clicked coordinate as the draft location and opens the
    /// creation form, atomically.
    MapClick {
        /// Clicked map coordinate.
        position: MapPosition,
    },

    /// The user clicked a pin marker, focusing it for detail display.
    MarkerClick {
        /// Store key of the clicked pin.
        pin_id: String,
    },

    /// The user dismissed the info overlay.
    CloseInfo,

    /// The explicit add-pin action; opens the form without touching the draft.
    ///
    /// The draft location may still be null afterwards; submission stays
    /// rejected until a map-click supplies one.
    OpenForm,

    /// The user cancelled the creation form.
    CancelForm,

    /// The user submitted the creation form.
    ///
    /// Validated locally: missing title, description, or draft location
    /// rejects the submission with no write attempted, leaving the form open.
    SubmitForm {
        /// Title entered in the form.
        title: String,
        /// Description entered in the form.
        description: String,
        /// Category chosen in the form.
        category: Category,
    },

    /// The user picked a filter value on the controls surface.
    FilterChanged {
        /// New filter predicate.
        filter: PinFilter,
    },

    /// The locate-me action; requests the device position.
    LocateMe,

    /// The geolocation capability resolved with a position.
    PositionResolved {
        /// Resolved device position.
        position: MapPosition,
    },

    /// The geolocation capability failed or is unsupported.
    PositionFailed {
        /// Failure kind.
        error: PositionError,
    },

    /// The store acknowledged the pin append.
    ///
    /// Closes the form and discards the draft; the pin itself enters the pin
    /// set via the subscription round-trip, not here.
    PinWritten {
        /// Generated key of the created pin.
        key: String,
    },

    /// The store rejected the pin append.
    ///
    /// The form stays open and populated so the user can resubmit.
    PinWriteFailed {
        /// Human-readable failure description.
        message: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns a `(redraw, actions)` pair: `redraw` signals that the derived view
/// model changed and should be recomposed, and the actions are side effects for
/// the engine to execute in sequence. May return no actions when the event
/// requires none (validation rejection, stale snapshot, dismissals).
///
/// # Errors
///
/// Reserved for state mutation failures; the current transitions are
/// infallible, but the signature matches the rest of the engine's error flow.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?std::mem::discriminant(event)).entered();

    match event {
        Event::SnapshotDelivered(snapshot) => {
            let previous = state.repository.current_pins().to_vec();
            if !state.repository.apply_snapshot(snapshot.clone()) {
                return Ok((false, vec![]));
            }

            let pruned = state.prune_selection();
            let changed = state.repository.current_pins() != previous.as_slice();
            if !changed && !pruned {
                tracing::debug!("pin set unchanged, skipping recompose");
            }
            Ok((changed || pruned, vec![]))
        }
        Event::MapClick { position } => {
            tracing::debug!(lat = position.lat, lng = position.lng, "map clicked, staging draft");
            state.open_form_at(*position);
            Ok((true, vec![]))
        }
        Event::MarkerClick { pin_id } => {
            if state.repository.contains(pin_id) {
                tracing::debug!(pin_id = %pin_id, "pin selected");
                state.selected_pin_id = Some(pin_id.clone());
                Ok((true, vec![]))
            } else {
                tracing::debug!(pin_id = %pin_id, "clicked marker refers to an unknown pin");
                Ok((false, vec![]))
            }
        }
        Event::CloseInfo => {
            state.selected_pin_id = None;
            Ok((true, vec![]))
        }
        Event::OpenForm => {
            state.form_visible = true;
            Ok((true, vec![]))
        }
        Event::CancelForm => {
            tracing::debug!("creation form cancelled");
            state.close_form();
            Ok((true, vec![]))
        }
        Event::SubmitForm {
            title,
            description,
            category,
        } => {
            let title = title.trim();
            let description = description.trim();

            let Some(location) = state.draft_location else {
                tracing::debug!("submission rejected: no draft location");
                return Ok((false, vec![]));
            };
            if title.is_empty() || description.is_empty() {
                tracing::debug!(
                    has_title = !title.is_empty(),
                    has_description = !description.is_empty(),
                    "submission rejected: missing required field"
                );
                return Ok((false, vec![]));
            }

            let pin = NewPin {
                title: title.to_string(),
                description: description.to_string(),
                category: *category,
                lat: location.lat,
                lng: location.lng,
                user_id: state.user_id.clone(),
                user_name: state.user_name.clone(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            };
            tracing::debug!(category = %pin.category, "submitting new pin");
            Ok((false, vec![Action::AppendPin(pin)]))
        }
        Event::FilterChanged { filter } => {
            tracing::debug!(filter = %filter, "filter changed");
            state.filter = *filter;
            Ok((true, vec![]))
        }
        Event::LocateMe => Ok((false, vec![Action::RequestPosition])),
        Event::PositionResolved { position } => {
            tracing::debug!(lat = position.lat, lng = position.lng, "device position resolved");
            state.user_position = Some(*position);
            Ok((true, vec![]))
        }
        Event::PositionFailed { error } => {
            tracing::debug!(error = %error, "position request failed");
            Ok((true, vec![Action::Notify(Notice::Geolocation(error.clone()))]))
        }
        Event::PinWritten { key } => {
            tracing::debug!(key = %key, "pin write acknowledged, closing form");
            state.close_form();
            Ok((true, vec![]))
        }
        Event::PinWriteFailed { message } => {
            tracing::debug!(error = %message, "pin write failed, keeping form open");
            Ok((true, vec![Action::Notify(Notice::WriteFailed(message.clone()))]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Pin;

    fn pin(id: &str, category: Category) -> Pin {
        Pin {
            id: id.to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            category,
            lat: 1.0,
            lng: 2.0,
            user_id: "anonymous-user".to_string(),
            user_name: "User1".to_string(),
            timestamp: 1000,
        }
    }

    fn fresh_state() -> AppState {
        AppState::new("anonymous-user", "User7")
    }

    #[test]
    fn map_click_stages_draft_and_opens_form() {
        let mut state = fresh_state();
        let (redraw, actions) = handle_event(
            &mut state,
            &Event::MapClick {
                position: MapPosition::new(5.0, 5.0),
            },
        )
        .unwrap();

        assert!(redraw);
        assert!(actions.is_empty());
        assert!(state.form_visible);
        assert_eq!(state.draft_location, Some(MapPosition::new(5.0, 5.0)));
    }

    #[test]
    fn open_form_without_draft_rejects_submission() {
        let mut state = fresh_state();
        handle_event(&mut state, &Event::OpenForm).unwrap();
        assert!(state.form_visible);
        assert!(state.draft_location.is_none());

        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitForm {
                title: "T".to_string(),
                description: "D".to_string(),
                category: Category::Food,
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert!(state.form_visible);
    }

    #[test]
    fn submission_with_missing_fields_performs_no_write() {
        let mut state = fresh_state();
        state.open_form_at(MapPosition::new(5.0, 5.0));

        for (title, description) in [("", "D"), ("T", ""), ("  ", "D")] {
            let (redraw, actions) = handle_event(
                &mut state,
                &Event::SubmitForm {
                    title: title.to_string(),
                    description: description.to_string(),
                    category: Category::Hidden,
                },
            )
            .unwrap();
            assert!(!redraw);
            assert!(actions.is_empty());
            assert!(state.form_visible);
        }
    }

    #[test]
    fn valid_submission_emits_exactly_one_append() {
        let mut state = fresh_state();
        state.open_form_at(MapPosition::new(5.0, 5.0));

        let before = chrono::Utc::now().timestamp_millis();
        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitForm {
                title: "T".to_string(),
                description: "D".to_string(),
                category: Category::Hidden,
            },
        )
        .unwrap();
        let after = chrono::Utc::now().timestamp_millis();

        assert_eq!(actions.len(), 1);
        let Action::AppendPin(new_pin) = &actions[0] else {
            panic!("expected an append action");
        };
        assert_eq!(new_pin.title, "T");
        assert_eq!(new_pin.description, "D");
        assert_eq!(new_pin.category, Category::Hidden);
        assert_eq!(new_pin.lat, 5.0);
        assert_eq!(new_pin.lng, 5.0);
        assert_eq!(new_pin.user_id, "anonymous-user");
        assert_eq!(new_pin.user_name, "User7");
        assert!((before..=after).contains(&new_pin.timestamp));

        // The form stays open until the write resolves.
        assert!(state.form_visible);
        assert!(state.draft_location.is_some());
    }

    #[test]
    fn write_ack_resets_draft_and_hides_form() {
        let mut state = fresh_state();
        state.open_form_at(MapPosition::new(5.0, 5.0));

        handle_event(
            &mut state,
            &Event::PinWritten {
                key: "pin-000001".to_string(),
            },
        )
        .unwrap();
        assert!(!state.form_visible);
        assert!(state.draft_location.is_none());
    }

    #[test]
    fn write_failure_preserves_the_form_and_notifies() {
        let mut state = fresh_state();
        state.open_form_at(MapPosition::new(5.0, 5.0));

        let (_, actions) = handle_event(
            &mut state,
            &Event::PinWriteFailed {
                message: "offline".to_string(),
            },
        )
        .unwrap();
        assert!(state.form_visible);
        assert!(state.draft_location.is_some());
        assert_eq!(
            actions,
            vec![Action::Notify(Notice::WriteFailed("offline".to_string()))]
        );
    }

    #[test]
    fn stale_snapshot_leaves_state_untouched() {
        let mut state = fresh_state();
        handle_event(
            &mut state,
            &Event::SnapshotDelivered(Snapshot {
                seq: 2,
                pins: vec![pin("newer", Category::Food)],
            }),
        )
        .unwrap();

        let (redraw, _) = handle_event(
            &mut state,
            &Event::SnapshotDelivered(Snapshot {
                seq: 1,
                pins: vec![pin("older", Category::Food)],
            }),
        )
        .unwrap();
        assert!(!redraw);
        assert_eq!(state.repository.current_pins()[0].id, "newer");
    }

    #[test]
    fn snapshot_prunes_dangling_selection() {
        let mut state = fresh_state();
        handle_event(
            &mut state,
            &Event::SnapshotDelivered(Snapshot {
                seq: 1,
                pins: vec![pin("a", Category::Food)],
            }),
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::MarkerClick {
                pin_id: "a".to_string(),
            },
        )
        .unwrap();
        assert_eq!(state.selected_pin_id.as_deref(), Some("a"));

        handle_event(
            &mut state,
            &Event::SnapshotDelivered(Snapshot {
                seq: 2,
                pins: vec![pin("b", Category::Food)],
            }),
        )
        .unwrap();
        assert!(state.selected_pin_id.is_none());
    }

    #[test]
    fn marker_click_on_unknown_pin_is_ignored() {
        let mut state = fresh_state();
        let (redraw, _) = handle_event(
            &mut state,
            &Event::MarkerClick {
                pin_id: "ghost".to_string(),
            },
        )
        .unwrap();
        assert!(!redraw);
        assert!(state.selected_pin_id.is_none());
    }

    #[test]
    fn position_failure_keeps_position_null_and_notifies() {
        let mut state = fresh_state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::PositionFailed {
                error: PositionError::Failed("denied".to_string()),
            },
        )
        .unwrap();
        assert!(state.user_position.is_none());
        assert_eq!(
            actions,
            vec![Action::Notify(Notice::Geolocation(PositionError::Failed(
                "denied".to_string()
            )))]
        );
    }

    #[test]
    fn locate_me_requests_the_position_capability() {
        let mut state = fresh_state();
        let (redraw, actions) = handle_event(&mut state, &Event::LocateMe).unwrap();
        assert!(!redraw);
        assert_eq!(actions, vec![Action::RequestPosition]);
    }
}
