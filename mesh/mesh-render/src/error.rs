//! Error types for preview rendering.

use thiserror::Error;

/// Result type for preview rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or saving a preview.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The mesh has no faces to draw.
    #[error("mesh has no faces to render")]
    EmptyMesh,

    /// The requested image has a zero dimension.
    #[error("invalid preview size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A face refers to a vertex that does not exist.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] mesh_types::MeshError),

    /// The mesh has non-finite coordinates.
    #[error("mesh bounds are not finite")]
    NonFiniteBounds,

    /// PNG encoding failed.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Writing the image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
