//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Binary STL shorter than its declared triangle count.
    #[error("truncated STL: header declares {expected} triangles, data holds {got}")]
    Truncated {
        /// Declared number of triangles.
        expected: u32,
        /// Complete triangles present.
        got: u32,
    },

    /// The mesh has more faces than a binary STL can declare.
    #[error("mesh has {faces} faces, more than an STL file can hold")]
    TooManyFaces {
        /// Face count of the mesh.
        faces: usize,
    },

    /// The mesh failed validation before export.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] mesh_types::MeshError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
