//! Error types for smoothing.

use thiserror::Error;

/// Result type for smoothing.
pub type SmoothResult<T> = Result<T, SmoothError>;

/// Errors that can occur while smoothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SmoothError {
    /// A smoothing parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A face refers to a vertex that does not exist.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] mesh_types::MeshError),
}
