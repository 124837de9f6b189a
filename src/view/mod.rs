//! View composition layer.
//!
//! Pure derivation of renderable map state from the application state,
//! following the MVVM split of state and display: the composer precomputes
//! everything the render surface needs (positions, icons, overlay content,
//! camera) and contains no business logic.
//!
//! # Modules
//!
//! - [`icons`]: closed category-to-glyph mapping
//! - [`viewmodel`]: view model types and the `compose` function

pub mod icons;
pub mod viewmodel;

pub use icons::MarkerIcon;
pub use viewmodel::{compose, InfoOverlay, MapViewModel, Marker, DEFAULT_ZOOM, WORLD_VIEW_CENTER};
