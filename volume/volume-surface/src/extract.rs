//! Decimated extraction with the empty-surface check.

use std::borrow::Cow;

use mesh_types::IndexedMesh;
use tracing::info;
use volume_types::{BinaryField, VoxelSpacing};

use crate::engine::SurfaceExtractionEngine;
use crate::error::{SurfaceError, SurfaceResult};

/// Extract the surface of `field` with `engine`, sampling every `step`-th
/// voxel along each axis.
///
/// With `step > 1` the field is decimated first and the spacing is scaled
/// by `step`, so the mesh keeps its physical size at a coarser resolution.
///
/// # Errors
///
/// - [`SurfaceError::InvalidParameter`] if `step` is zero
/// - [`SurfaceError::EmptySurface`] if the engine produces no vertices or
///   no faces
/// - any error raised by the engine
pub fn extract_surface<E: SurfaceExtractionEngine + ?Sized>(
    engine: &E,
    field: &BinaryField,
    spacing: VoxelSpacing,
    step: usize,
) -> SurfaceResult<IndexedMesh> {
    if step == 0 {
        return Err(SurfaceError::InvalidParameter {
            name: "step_size",
            reason: "must be at least 1".to_string(),
        });
    }

    let (field, spacing) = if step > 1 {
        #[allow(clippy::cast_precision_loss)]
        let factor = step as f64;
        (Cow::Owned(field.decimate(step)), spacing.scaled(factor))
    } else {
        (Cow::Borrowed(field), spacing)
    };

    let mesh = engine.extract(&field, spacing)?;
    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return Err(SurfaceError::EmptySurface {
            selected: field.count_true(),
            total: field.dims().len(),
        });
    }

    info!(
        engine = engine.name(),
        step,
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Extracted surface"
    );
    Ok(mesh)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::MarchingCubesEngine;
    use approx::assert_relative_eq;
    use mesh_types::MeshBounds;
    use volume_types::VolumeDims;

    fn block(n: usize) -> BinaryField {
        BinaryField::from_fn(VolumeDims::new(n, n, n), |s, r, c| {
            (2..n - 2).contains(&s) && (2..n - 2).contains(&r) && (2..n - 2).contains(&c)
        })
    }

    #[test]
    fn step_zero_is_rejected() {
        let err = extract_surface(&MarchingCubesEngine::new(), &block(8), VoxelSpacing::UNIT, 0)
            .unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidParameter { name: "step_size", .. }));
    }

    #[test]
    fn uniform_fields_are_empty_surfaces() {
        let dims = VolumeDims::new(5, 5, 5);
        for value in [true, false] {
            let err = extract_surface(
                &MarchingCubesEngine::new(),
                &BinaryField::filled(dims, value),
                VoxelSpacing::UNIT,
                1,
            )
            .unwrap_err();
            assert!(matches!(err, SurfaceError::EmptySurface { total: 125, .. }));
        }
    }

    #[test]
    fn decimation_keeps_physical_extent() {
        let engine = MarchingCubesEngine::new();
        let field = block(17);
        let fine = extract_surface(&engine, &field, VoxelSpacing::UNIT, 1).unwrap();
        let coarse = extract_surface(&engine, &field, VoxelSpacing::UNIT, 2).unwrap();

        assert!(coarse.faces.len() < fine.faces.len());
        // Both meshes sit around the same block, within one coarse cell
        let (a, b) = (fine.bounds(), coarse.bounds());
        assert!((a.center() - b.center()).norm() < 2.0);
        assert_relative_eq!(a.size().x, b.size().x, epsilon = 2.0);
    }
}
