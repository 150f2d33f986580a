//! Stacking ordered slices into a volume.

use tracing::{debug, info};
use volume_types::{SliceRecord, Volume, VolumeDims, VoxelSpacing};

use crate::error::{ProcessError, ProcessResult};

/// Voxel spacing for a series, taken from its first slice.
///
/// Both Slice Thickness and Pixel Spacing must be present; otherwise the
/// series falls back to unit spacing on every axis.
#[must_use]
pub fn series_spacing(records: &[SliceRecord]) -> VoxelSpacing {
    records
        .first()
        .and_then(|first| {
            let thickness = first.slice_thickness?;
            let pixel = first.pixel_spacing?;
            Some(VoxelSpacing::new(thickness, pixel.row, pixel.col))
        })
        .unwrap_or(VoxelSpacing::UNIT)
}

/// Apply each slice's rescale and stack the slices in order.
///
/// Slice `i` of the result is `records[i]`. Slices without a rescale keep
/// their stored values.
///
/// # Errors
///
/// Returns [`ProcessError::EmptySeries`] for an empty slice list and
/// [`ProcessError::ShapeMismatch`] if any slice differs in shape from the
/// first.
pub fn build_volume(records: &[SliceRecord]) -> ProcessResult<Volume> {
    let first = records.first().ok_or(ProcessError::EmptySeries)?;
    let shape = first.shape();

    if let Some((index, found)) = records
        .iter()
        .map(SliceRecord::shape)
        .enumerate()
        .find(|&(_, s)| s != shape)
    {
        return Err(ProcessError::ShapeMismatch {
            index,
            expected: shape,
            found,
        });
    }

    let dims = VolumeDims::new(records.len(), shape.rows, shape.cols);
    let mut values = Vec::with_capacity(dims.len());
    let mut rescaled = 0usize;
    for record in records {
        match record.rescale {
            Some(rescale) => {
                values.extend(record.grid.data().iter().map(|&v| rescale.apply(v)));
                rescaled += 1;
            }
            None => values.extend_from_slice(record.grid.data()),
        }
    }

    let spacing = series_spacing(records);
    debug!(rescaled, "Applied rescale");
    info!(
        depth = dims.depth,
        rows = dims.rows,
        cols = dims.cols,
        spacing = ?spacing,
        "Built volume"
    );
    Ok(Volume::new(dims, values, spacing)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use volume_types::{GridShape, SliceGrid};

    fn slice(value: f32, arrival: usize) -> SliceRecord {
        SliceRecord::new(SliceGrid::filled(GridShape::new(2, 3), value), arrival)
    }

    #[test]
    fn stacks_in_record_order() {
        let records = vec![slice(1.0, 0), slice(2.0, 1), slice(3.0, 2)];
        let volume = build_volume(&records).unwrap();

        assert_eq!(volume.dims(), VolumeDims::new(3, 2, 3));
        assert_eq!(volume.get(0, 1, 2), Some(1.0));
        assert_eq!(volume.get(2, 0, 0), Some(3.0));
    }

    #[test]
    fn rescale_is_applied_per_slice() {
        let records = vec![
            slice(100.0, 0).with_rescale(2.0, -1024.0),
            slice(100.0, 1),
        ];
        let volume = build_volume(&records).unwrap();
        assert_relative_eq!(volume.get(0, 0, 0).unwrap(), -824.0);
        assert_relative_eq!(volume.get(1, 0, 0).unwrap(), 100.0);
    }

    #[test]
    fn spacing_from_first_slice() {
        let records = vec![
            slice(0.0, 0).with_spacing(0.5, 0.75, 2.0),
            slice(0.0, 1).with_spacing(9.0, 9.0, 9.0),
        ];
        let spacing = build_volume(&records).unwrap().spacing();
        assert_eq!(spacing, VoxelSpacing::new(2.0, 0.5, 0.75));
    }

    #[test]
    fn partial_spacing_falls_back_to_unit() {
        let mut first = slice(0.0, 0);
        first.slice_thickness = Some(3.0);
        assert_eq!(series_spacing(&[first]), VoxelSpacing::UNIT);
        assert_eq!(series_spacing(&[]), VoxelSpacing::UNIT);
    }

    #[test]
    fn mismatched_shape_is_reported() {
        let odd = SliceRecord::new(SliceGrid::filled(GridShape::new(3, 3), 0.0), 1);
        let err = build_volume(&[slice(0.0, 0), odd]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::ShapeMismatch {
                index: 1,
                expected: GridShape::new(2, 3),
                found: GridShape::new(3, 3),
            }
        );
    }

    #[test]
    fn empty_series_is_an_error() {
        assert_eq!(build_volume(&[]).unwrap_err(), ProcessError::EmptySeries);
    }
}
