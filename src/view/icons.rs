//! Closed category-to-icon mapping for map markers.
//!
//! Each of the four pin categories plus the user-position marker maps to a
//! distinct glyph. The mapping is total over the closed [`Category`]
//! enumeration: unrecognized categories never reach here because they fail at
//! the store decoding boundary.

use crate::domain::Category;

/// Marker glyph for the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    /// Blue dot: landmarks.
    Landmark,
    /// Red dot: food and drinks.
    Food,
    /// Purple dot: hidden gems.
    Hidden,
    /// Green dot: activities.
    Activity,
    /// Yellow dot: the device position.
    User,
}

impl MarkerIcon {
    /// Icon for a pin of the given category.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Landmark => Self::Landmark,
            Category::Food => Self::Food,
            Category::Hidden => Self::Hidden,
            Category::Activity => Self::Activity,
        }
    }

    /// Classic marker asset URL understood by the map surface.
    #[must_use]
    pub const fn asset_url(&self) -> &'static str {
        match self {
            Self::Landmark => "http://maps.google.com/mapfiles/ms/icons/blue-dot.png",
            Self::Food => "http://maps.google.com/mapfiles/ms/icons/red-dot.png",
            Self::Hidden => "http://maps.google.com/mapfiles/ms/icons/purple-dot.png",
            Self::Activity => "http://maps.google.com/mapfiles/ms/icons/green-dot.png",
            Self::User => "http://maps.google.com/mapfiles/ms/icons/yellow-dot.png",
        }
    }
}
