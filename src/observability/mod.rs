//! Tracing setup for the engine.
//!
//! Structured logging is built on `tracing` with a `tracing-subscriber`
//! pipeline. Hosts embedding the engine call [`init_tracing`] once, early;
//! everything else in the crate only emits spans and events.
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup

mod init;

pub use init::init_tracing;
