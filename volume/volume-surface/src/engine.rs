//! Extraction strategy seam.

use mesh_types::IndexedMesh;
use volume_types::{BinaryField, VoxelSpacing};

use crate::error::SurfaceResult;

/// Turns a binary field into a surface mesh.
///
/// Implementations place lattice point `(slice, row, col)` at
/// `(col * spacing.col, row * spacing.row, slice * spacing.slice)` and wind
/// faces counter-clockwise seen from the selected side's exterior. An
/// empty mesh is a valid return; callers decide whether that is an error.
pub trait SurfaceExtractionEngine {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Extract the boundary of the selected voxels.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be represented as a mesh.
    fn extract(&self, field: &BinaryField, spacing: VoxelSpacing) -> SurfaceResult<IndexedMesh>;
}

impl<E: SurfaceExtractionEngine + ?Sized> SurfaceExtractionEngine for &E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn extract(&self, field: &BinaryField, spacing: VoxelSpacing) -> SurfaceResult<IndexedMesh> {
        (**self).extract(field, spacing)
    }
}
