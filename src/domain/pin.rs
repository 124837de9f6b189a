//! Pin domain model and the closed category enumeration.
//!
//! This module defines the core [`Pin`] type representing a user-contributed
//! point of interest, the [`NewPin`] draft submitted for creation, and the
//! [`Category`] enumeration. Categories are a closed tagged variant: values
//! outside the enumeration fail at the store decoding boundary instead of
//! producing an unrenderable marker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::MapPosition;

/// Placeholder identity attached to every created pin.
///
/// A stand-in for real authentication. The value is an opaque display-only
/// label and is never used for access control.
pub const USER_ID_PLACEHOLDER: &str = "anonymous-user";

/// The closed set of discovery categories.
///
/// Serialized in lowercase on the wire (`"landmark"`, `"food"`, `"hidden"`,
/// `"activity"`). Deserializing any other value is a decoding error, which the
/// store adapter treats as a data-integrity failure for that entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A notable landmark or sight.
    Landmark,
    /// Food and drinks.
    Food,
    /// A hidden gem off the beaten path.
    Hidden,
    /// An activity or experience.
    Activity,
}

impl Category {
    /// All categories, in the order the controls surface lists them.
    pub const ALL: [Self; 4] = [Self::Landmark, Self::Food, Self::Hidden, Self::Activity];

    /// Lowercase wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Landmark => "landmark",
            Self::Food => "food",
            Self::Hidden => "hidden",
            Self::Activity => "activity",
        }
    }

    /// Human-readable label for the controls surface.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Landmark => "Landmarks",
            Self::Food => "Food & Drinks",
            Self::Hidden => "Hidden Gems",
            Self::Activity => "Activities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized category: {}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landmark" => Ok(Self::Landmark),
            "food" => Ok(Self::Food),
            "hidden" => Ok(Self::Hidden),
            "activity" => Ok(Self::Activity),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}

/// A persisted, immutable point-of-interest record.
///
/// Pins enter the engine only through store snapshots: the `id` is the key the
/// store generated on creation, and no update or delete operations exist. The
/// `timestamp` is the creation instant in integer milliseconds since the epoch,
/// monotonically non-decreasing per client but not globally ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    /// Store-generated key, unique within the active pin set.
    pub id: String,
    /// Non-empty title shown in the info overlay.
    pub title: String,
    /// Non-empty description shown in the info overlay.
    pub description: String,
    /// Discovery category, a member of the closed enumeration.
    pub category: Category,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Opaque author identifier, currently a constant placeholder.
    pub user_id: String,
    /// Client-generated author display name.
    pub user_name: String,
    /// Creation instant, integer milliseconds since the epoch.
    pub timestamp: i64,
}

impl Pin {
    /// The pin's coordinates as a [`MapPosition`].
    #[must_use]
    pub const fn position(&self) -> MapPosition {
        MapPosition::new(self.lat, self.lng)
    }
}

/// A pin awaiting persistence: all [`Pin`] fields except the store key.
///
/// Produced only by successful form-submission validation. Becomes durable and
/// acquires an id upon successful append; it enters the canonical pin set via
/// the next store snapshot rather than by optimistic local insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPin {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: i64,
}
