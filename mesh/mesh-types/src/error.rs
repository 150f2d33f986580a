//! Error types for mesh validation.

use thiserror::Error;

/// Result type for mesh validation.
pub type MeshResult<T> = Result<T, MeshError>;

/// Structural defects detected in an [`IndexedMesh`](crate::IndexedMesh).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face references a vertex past the end of the vertex list.
    #[error("face {face} references vertex {index}, but mesh has only {vertex_count} vertices")]
    IndexOutOfBounds {
        /// Offending face index.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A vertex coordinate is NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Offending vertex index.
        index: usize,
    },
}
