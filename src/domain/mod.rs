//! Domain layer for the pindrop engine.
//!
//! This module contains the core domain types for the engine, independent of
//! any capability boundary (store, geolocation, render surface). It keeps the
//! pin model and its invariants isolated from wire formats and UI state.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`pin`]: Pin model, draft pins, and the closed category enumeration
//! - [`position`]: Geographic coordinates and their valid ranges

pub mod error;
pub mod pin;
pub mod position;

pub use error::{PindropError, Result};
pub use pin::{Category, CategoryParseError, NewPin, Pin, USER_ID_PLACEHOLDER};
pub use position::MapPosition;
