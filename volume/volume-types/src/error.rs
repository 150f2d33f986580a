//! Error types for volume data construction.

use thiserror::Error;

/// Result type for volume data construction.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors raised when building grids, volumes or fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// A sample buffer does not match the declared dimensions.
    #[error("expected {expected} samples, got {got}")]
    LengthMismatch {
        /// Sample count implied by the dimensions.
        expected: usize,
        /// Sample count supplied.
        got: usize,
    },

    /// A shape string is not of the form `WIDTHxHEIGHT`.
    #[error("invalid grid shape '{input}': expected WIDTHxHEIGHT, e.g. 512x512")]
    ParseShape {
        /// The rejected input.
        input: String,
    },
}
