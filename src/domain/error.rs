//! Error types for the pindrop engine.
//!
//! This module defines the centralized error type [`PindropError`] and a type alias
//! [`Result`] for convenient error handling throughout the engine. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for pindrop engine operations.
///
/// This enum consolidates all error conditions that can occur while keeping the
/// local pin set synchronized with the remote store, from capability failures to
/// decoding problems at the store boundary. No variant is fatal to the embedding
/// process; every error is recoverable by user retry or is a safe no-op.
///
/// # Examples
///
/// ```
/// use pindrop::domain::PindropError;
///
/// fn append_failed() -> Result<(), PindropError> {
///     Err(PindropError::Store("connection reset".to_string()))
/// }
/// assert!(append_failed().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PindropError {
    /// Remote store operation failed.
    ///
    /// Occurs when appending a record to the remote collection fails or the
    /// subscription channel reports an error. The string contains a description
    /// of what went wrong. The creation form must stay populated so the user
    /// can resubmit.
    #[error("Store error: {0}")]
    Store(String),

    /// A delivered record could not be decoded into a pin.
    ///
    /// Occurs at the store boundary when an entry carries an unrecognized
    /// category, an out-of-range coordinate, or a missing field. Malformed
    /// entries are skipped with an integrity warning; they never fail the
    /// whole snapshot.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations (configuration and
    /// log file handling). Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or carries malformed
    /// values. The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for pindrop operations.
///
/// This is a type alias for `std::result::Result<T, PindropError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, PindropError>;
