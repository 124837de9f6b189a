//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core logic layer of the engine, sitting between the
//! runtime driver and the domain/store layers. It implements the event-driven
//! architecture that keeps the rendered map consistent.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Store snapshots / user input → Events → Event Handler → State Mutations
//!                      ↑                                        ↓
//!                      └───── Capability completions ←──── Actions
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands and user-visible notices
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Filter predicate for the pin projection
//! - [`repository`]: Canonical pin set with full-replace snapshot semantics
//! - [`state`]: Central application state container

pub mod actions;
pub mod handler;
pub mod modes;
pub mod repository;
pub mod state;

pub use actions::{Action, Notice};
pub use handler::{handle_event, Event};
pub use modes::PinFilter;
pub use repository::PinRepository;
pub use state::AppState;
