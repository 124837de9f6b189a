//! Wire-format pin records and snapshot decoding.
//!
//! This module defines the storage-layer representation of a pin and the
//! decoding boundary between the raw upstream field bags and the domain
//! [`Pin`] type. These types are separate from the domain model to keep the
//! wire format (camelCase field names, stringly-typed categories) out of the
//! business logic.
//!
//! # Integrity Policy
//!
//! Decoding is per-entry: a malformed entry (unrecognized category, missing
//! field, out-of-range coordinate) is skipped with a `tracing::warn!`
//! integrity log, and the entries that did decode are still delivered. A
//! single bad record never fails the whole snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PindropError, Result};
use crate::domain::{Category, MapPosition, NewPin, Pin};
use crate::store::collection::RawCollection;

/// Raw pin record as stored in the remote collection.
///
/// Field names follow the upstream wire format. The `category` field uses the
/// closed [`Category`] enumeration, so unrecognized values fail to deserialize
/// here, at the boundary, rather than surfacing later as unrenderable markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRecord {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: i64,
}

impl PinRecord {
    /// Converts the record into a domain pin under the given store key.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the coordinates fall outside the valid
    /// geographic ranges.
    pub fn into_pin(self, id: impl Into<String>) -> Result<Pin> {
        let id = id.into();
        if !MapPosition::new(self.lat, self.lng).is_valid() {
            return Err(PindropError::Decode(format!(
                "pin {id}: coordinates out of range ({}, {})",
                self.lat, self.lng
            )));
        }
        Ok(Pin {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            lat: self.lat,
            lng: self.lng,
            user_id: self.user_id,
            user_name: self.user_name,
            timestamp: self.timestamp,
        })
    }
}

impl From<&NewPin> for PinRecord {
    fn from(pin: &NewPin) -> Self {
        Self {
            title: pin.title.clone(),
            description: pin.description.clone(),
            category: pin.category,
            lat: pin.lat,
            lng: pin.lng,
            user_id: pin.user_id.clone(),
            user_name: pin.user_name.clone(),
            timestamp: pin.timestamp,
        }
    }
}

/// A complete, point-in-time decoding of the remote pin collection.
///
/// The sequence number is attached by the adapter, monotonically increasing
/// per delivery. Consumers use it to discard out-of-order deliveries: the
/// upstream snapshots carry no inherent ordering of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Adapter-assigned delivery sequence, starting at 1.
    pub seq: u64,
    /// Every pin that decoded from the raw collection, in source order.
    pub pins: Vec<Pin>,
}

/// Decodes a single raw entry into a domain pin.
///
/// # Errors
///
/// Returns a decode error if the field bag does not match the wire format or
/// carries an invalid category or coordinate.
pub fn decode_entry(key: &str, value: &serde_json::Value) -> Result<Pin> {
    let record: PinRecord = serde_json::from_value(value.clone())
        .map_err(|e| PindropError::Decode(format!("pin {key}: {e}")))?;
    record.into_pin(key)
}

/// Decodes a full raw collection, skipping malformed entries.
///
/// Entries are processed in source order; each failure is logged as an
/// integrity warning and excluded from the result. An empty raw collection
/// decodes to an empty vector.
#[must_use]
pub fn decode_collection(raw: &RawCollection) -> Vec<Pin> {
    let mut pins = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        match decode_entry(key, value) {
            Ok(pin) => pins.push(pin),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "skipping malformed pin record");
            }
        }
    }
    pins
}
