//! Actions representing side effects to be executed by the engine runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after processing user input or capability results. Actions
//! bridge pure state transformations and effectful operations: appending to the
//! remote store, requesting a device position, surfacing a notice.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! engine executes the actions in sequence, and each capability request feeds
//! exactly one completion event back into the handler.

use crate::domain::NewPin;
use crate::geo::PositionError;

/// Commands representing side effects to be executed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Appends a validated draft pin to the remote collection.
    ///
    /// Emitted only after submission validation passed. The write resolves as
    /// a `PinWritten` or `PinWriteFailed` event; the pin itself arrives via
    /// the next snapshot, never by optimistic insertion.
    AppendPin(NewPin),

    /// Requests the current device position from the geolocation capability.
    ///
    /// Resolves as a `PositionResolved` or `PositionFailed` event.
    RequestPosition,

    /// Surfaces a user-visible notice on the controls surface.
    Notify(Notice),
}

/// User-visible notices produced by recoverable failures.
///
/// None of these trigger automatic retries; the user retries manually, and in
/// the write-failure case the creation form stays open and populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The geolocation request failed or the capability is absent.
    Geolocation(PositionError),

    /// Appending a pin to the store failed; the form input is preserved.
    WriteFailed(String),
}

impl Notice {
    /// Message to present to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Geolocation(PositionError::Unsupported) => {
                "Error: Your environment doesn't support geolocation.".to_string()
            }
            Self::Geolocation(PositionError::Failed(_)) => {
                "Error: The geolocation service failed.".to_string()
            }
            Self::WriteFailed(reason) => {
                format!("Saving your discovery failed: {reason}")
            }
        }
    }
}
