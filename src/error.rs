//! Error types for advertisement construction helpers
//!
//! The resolution pipeline itself has no fallible operations: frames that do
//! not match a known tracker family are silently dropped as normal control
//! flow, not surfaced as errors. Errors only arise when building a
//! [`crate::RawAdvertisement`] from untrusted textual input.

use thiserror::Error;

/// Result type alias for advertisement construction
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that can occur while constructing advertisement fields
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Invalid hex string format
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
}
