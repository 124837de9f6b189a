//! Store layer: realtime collection capability, wire records, and the adapter.
//!
//! # Organization
//!
//! - [`collection`]: `RealtimeCollection` trait and subscription handles
//! - [`records`]: wire-format pin records and snapshot decoding
//! - [`adapter`]: the pin store adapter (watch, decode, sequence, append)
//! - [`memory`]: in-memory reference backend

pub mod adapter;
pub mod collection;
pub mod memory;
pub mod records;

pub use adapter::PinStoreAdapter;
pub use collection::{RawCollection, RealtimeCollection, SnapshotCallback, Subscription};
pub use memory::InMemoryCollection;
pub use records::{decode_collection, decode_entry, PinRecord, Snapshot};
