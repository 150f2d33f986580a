//! Error types for surface extraction.

use thiserror::Error;

/// Result type for surface extraction.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors raised while extracting a surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The field has no boundary between selected and unselected voxels.
    #[error("no surface found: {selected} of {total} voxels selected")]
    EmptySurface {
        /// Selected voxels in the (decimated) field.
        selected: usize,
        /// Total voxels in the (decimated) field.
        total: usize,
    },

    /// An extraction parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The surface has more vertices than a mesh can index.
    #[error("surface has {count} vertices, more than a mesh can index")]
    TooManyVertices {
        /// Number of vertices produced.
        count: usize,
    },
}
