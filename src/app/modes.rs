//! Filter mode for the pin projection.
//!
//! The category filter is a client-side display predicate only; it is never
//! persisted or sent upstream. The controls surface selects it from the fixed
//! values `all`, `landmark`, `food`, `hidden`, `activity`.

use std::fmt;
use std::str::FromStr;

use crate::domain::{Category, CategoryParseError, Pin};

/// Predicate applied to the canonical pin set for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinFilter {
    /// Pass-through: every pin is shown.
    #[default]
    All,
    /// Only pins of the given category are shown.
    Category(Category),
}

impl PinFilter {
    /// Returns `true` when the pin passes the filter.
    #[must_use]
    pub fn matches(&self, pin: &Pin) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => pin.category == *category,
        }
    }
}

impl fmt::Display for PinFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => f.write_str(category.as_str()),
        }
    }
}

impl FromStr for PinFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<Category>().map(Self::Category)
    }
}
