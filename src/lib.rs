//! Pindrop: a real-time discovery pin synchronization and view-state
//! reconciliation engine.
//!
//! Pindrop keeps a client's in-memory pin set consistent with a shared remote
//! store under concurrent multi-user writes, merges that state with local UI
//! state (selection, category filter, pending-creation draft), and guarantees
//! the rendered map never shows stale, duplicated, or inconsistent pins.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime Driver (engine.rs)                         │  ← Event pump
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Action dispatching                               │
//! │  - Canonical pin set (repository)                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View Layer    │   │ Store Layer   │   │ Geolocation   │
//! │ (view/)       │   │ (store/)      │   │ (geo)         │
//! │ - Viewmodel   │   │ - Watch/decode│   │ - Position    │
//! │ - Icon map    │   │ - Append path │   │   capability  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Pin model, closed categories                     │
//! │  - Coordinates, error types                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! Store snapshots flow down: the adapter decodes every upstream change into a
//! complete pin list, attaches a monotonic sequence, and the repository
//! replaces its content wholesale (stale deliveries are discarded). User
//! interaction flows the opposite way as events; side effects come back as
//! single-shot completion events. There is no optimistic insertion: a created
//! pin becomes visible only through the subscription round-trip, which keeps
//! last-snapshot-wins as the entire consistency model.
//!
//! # Example
//!
//! ```
//! use pindrop::engine::Engine;
//! use pindrop::geo::UnsupportedPositionSource;
//! use pindrop::store::InMemoryCollection;
//! use pindrop::{Config, Event, MapPosition};
//!
//! let store = InMemoryCollection::new();
//! let mut engine = Engine::new(&Config::default(), store, UnsupportedPositionSource)?;
//!
//! // A map click stages a draft location and opens the creation form.
//! engine.dispatch(Event::MapClick {
//!     position: MapPosition::new(5.0, 5.0),
//! })?;
//! assert!(engine.state().form_visible);
//! # Ok::<(), pindrop::PindropError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Full-Replace Synchronization
//!
//! Every store delivery is a total replacement of the pin set, never a merge.
//! Combined with create-only pins this removes the conflict-resolution problem
//! entirely at the cost of write-to-visible latency.
//!
//! ## Closed Categories at the Boundary
//!
//! The category enumeration is closed at the store decoding boundary:
//! unrecognized values fail fast per entry and are excluded with an integrity
//! warning instead of producing unrenderable markers.
//!
//! ## Capability Traits at the Seams
//!
//! The remote store, the geolocation sensor, and the render surface are
//! capabilities. The crate ships an in-memory store backend; hosts plug in
//! their platform adapters.

pub mod app;
pub mod domain;
pub mod engine;
pub mod geo;
pub mod observability;
pub mod store;
pub mod view;

pub use app::{handle_event, Action, AppState, Event, Notice, PinFilter, PinRepository};
pub use domain::{Category, MapPosition, NewPin, Pin, PindropError, Result};
pub use engine::Engine;
pub use geo::{PositionError, PositionSource};
pub use store::{InMemoryCollection, PinStoreAdapter, RealtimeCollection, Snapshot};
pub use view::{MapViewModel, Marker, MarkerIcon};

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::USER_ID_PLACEHOLDER;

/// Engine configuration.
///
/// Loadable from a TOML file; every field has a default so an empty file (or
/// [`Config::default`]) yields a working engine.
///
/// ```toml
/// collection = "pins"
/// display_name = "Ada"
/// trace_level = "debug"
/// log_file = "/var/log/pindrop.log"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the remote pin collection to watch. Default: `"pins"`.
    pub collection: String,

    /// Author display name attached to created pins.
    ///
    /// When unset, a `User<N>` name is generated once at initialization as
    /// an explicit stand-in for real authentication, display-only.
    pub display_name: Option<String>,

    /// Tracing level filter. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`. Default: `"info"`. Overridden by `RUST_LOG`.
    pub trace_level: Option<String>,

    /// Append-mode log file; events go to standard output when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: "pins".to_string(),
            display_name: None,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read and a configuration
    /// error if it is not valid TOML or carries unknown fields.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| PindropError::Config(format!("failed to parse config: {e}")))
    }
}

/// Creates the initial application state from configuration.
///
/// Resolves the author identity: the configured display name, or a generated
/// `User<N>` placeholder, together with the constant anonymous user id.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let user_name = config
        .display_name
        .clone()
        .unwrap_or_else(generated_display_name);
    tracing::debug!(collection = %config.collection, user_name = %user_name, "initializing engine state");
    AppState::new(USER_ID_PLACEHOLDER, user_name)
}

fn generated_display_name() -> String {
    let n = chrono::Utc::now().timestamp_millis().rem_euclid(1000);
    format!("User{n}")
}
