//! Geolocation capability abstraction.
//!
//! Wraps the device's location capability behind a trait: at most one resolved
//! position or one failure per request, never both and never zero. The engine
//! translates the resolution into a `PositionResolved` or `PositionFailed`
//! event, so a requester is never left waiting indefinitely.

use thiserror::Error;

use crate::domain::MapPosition;

/// Failure taxonomy of a position request.
///
/// Both variants surface as user-visible notices without automatic retries;
/// the user may re-trigger the locate-me action manually.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The environment provides no geolocation capability at all.
    #[error("geolocation is not supported by this environment")]
    Unsupported,

    /// The capability exists but the request errored or was denied.
    #[error("the geolocation service failed: {0}")]
    Failed(String),
}

/// Source of single-shot device position requests.
///
/// # Implementations
///
/// Host applications adapt their platform's location API here. Tests use
/// fixed-response stubs.
pub trait PositionSource {
    /// Requests the current device position.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::Unsupported`] when the capability is absent
    /// and [`PositionError::Failed`] when the request errors or is denied.
    fn request_position(&mut self) -> Result<MapPosition, PositionError>;
}

/// A position source for environments without any geolocation capability.
///
/// Every request resolves with [`PositionError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPositionSource;

impl PositionSource for UnsupportedPositionSource {
    fn request_position(&mut self) -> Result<MapPosition, PositionError> {
        Err(PositionError::Unsupported)
    }
}
