//! Geographic position type shared by pins, the draft location, and the
//! geolocation capability.

use serde::{Deserialize, Serialize};

/// Inclusive latitude range accepted by the engine, in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Inclusive longitude range accepted by the engine, in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A geographic coordinate pair in degrees.
///
/// Used for pin locations, the transient draft location captured from a
/// map-click, and resolved device positions. The type itself does not enforce
/// the coordinate ranges; the store decoding boundary rejects out-of-range
/// values as integrity errors via [`MapPosition::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    /// Latitude in degrees, valid within [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid within [-180, 180].
    pub lng: f64,
}

impl MapPosition {
    /// Creates a position from raw latitude/longitude degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both coordinates fall within the valid geographic
    /// ranges and are finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use pindrop::domain::MapPosition;
    ///
    /// assert!(MapPosition::new(10.0, 20.0).is_valid());
    /// assert!(!MapPosition::new(91.0, 0.0).is_valid());
    /// assert!(!MapPosition::new(0.0, -181.0).is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&self.lat)
            && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_coordinates_are_valid() {
        assert!(MapPosition::new(90.0, 180.0).is_valid());
        assert!(MapPosition::new(-90.0, -180.0).is_valid());
        assert!(MapPosition::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn out_of_range_and_non_finite_coordinates_are_invalid() {
        assert!(!MapPosition::new(90.5, 0.0).is_valid());
        assert!(!MapPosition::new(0.0, 180.5).is_valid());
        assert!(!MapPosition::new(f64::NAN, 0.0).is_valid());
        assert!(!MapPosition::new(0.0, f64::INFINITY).is_valid());
    }
}
