//! Surface reconstruction from tomographic slice series.
//!
//! Turns a directory of DICOM slices into an STL surface mesh and a PNG
//! preview. The stages run strictly in sequence:
//!
//! 1. load and order slices ([`load`])
//! 2. normalize slice shapes, stack, filter and threshold ([`process`])
//! 3. extract the iso-surface ([`surface`])
//! 4. smooth the mesh ([`smooth`])
//! 5. write the STL ([`io`]) and render the preview ([`render`])
//!
//! [`Pipeline`] wires the stages together and returns a serializable
//! [`RunReport`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use tomomesh::prelude::*;
//!
//! let config = PipelineConfig::from_toml_str("min_threshold = 400").unwrap();
//! let pipeline = Pipeline::new(config).unwrap();
//! let report = pipeline.run(Path::new("scan/"), Path::new("bone.stl"), Path::new("bone.png"));
//!
//! if !report.success {
//!     eprintln!("{report}");
//! }
//! ```
//!
//! # Failures
//!
//! Every fatal error maps to one [`ErrorKind`]. Unreadable files in the
//! input directory are skipped with a warning, and a failed preview is a
//! warning too; nothing else is recovered.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod pipeline;
mod report;

pub use config::{parse_max_threshold, PipelineConfig};
pub use error::{ErrorKind, PipelineError, PipelineResult};
pub use pipeline::{Pipeline, Reconstruction};
pub use report::{RunReport, RunStats};

// =============================================================================
// Re-exports
// =============================================================================

/// Mesh data model: `IndexedMesh`, `Vertex`, `Aabb`.
pub use mesh_types as types;

/// STL reading and writing.
pub use mesh_io as io;

/// Laplacian mesh smoothing.
pub use mesh_smooth as smooth;

/// Preview rendering.
pub use mesh_render as render;

/// Slice and volume data model.
pub use volume_types as volume;

/// Slice discovery, DICOM parsing and ordering.
pub use volume_load as load;

/// Shape normalization, stacking, filtering and segmentation.
pub use volume_process as process;

/// Iso-surface extraction.
pub use volume_surface as surface;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for running the pipeline.
///
/// ```
/// use tomomesh::prelude::*;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.filter, FilterKind::Gaussian);
/// ```
pub mod prelude {
    pub use crate::{ErrorKind, Pipeline, PipelineConfig, PipelineError, RunReport};

    pub use mesh_io::{load_stl, save_stl, StlEncoding};
    pub use mesh_render::PreviewParams;
    pub use mesh_smooth::SmoothParams;
    pub use mesh_types::{IndexedMesh, MeshBounds, MeshTopology};
    pub use volume_load::{DicomSliceSource, SliceSource};
    pub use volume_process::FilterKind;
    pub use volume_surface::{MarchingCubesEngine, SurfaceExtractionEngine};
    pub use volume_types::{GridShape, SliceRecord};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_imports() {
        use prelude::*;

        let mesh = IndexedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(PipelineConfig::default().stl_encoding, StlEncoding::Binary);
    }

    #[test]
    fn module_reexports() {
        let _ = types::IndexedMesh::new();
        let _ = smooth::SmoothParams::default();
        let _ = render::PreviewParams::default();
        let _ = volume::GridShape::new(1, 1);
    }
}
