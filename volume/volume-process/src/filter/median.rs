//! 3x3x3 median filter.

use volume_types::Volume;

use super::reflect;
use crate::error::ProcessResult;

const SIZE: usize = 27;

/// Replace every voxel with the median of its 3x3x3 neighbourhood.
///
/// # Errors
///
/// Propagates volume construction errors; none occur for a well-formed
/// input.
pub fn median_filter(volume: &Volume) -> ProcessResult<Volume> {
    let dims = volume.dims();
    let values = volume.values();
    let mut out = Vec::with_capacity(values.len());
    let mut window = [0.0f32; SIZE];

    for s in 0..dims.depth {
        for r in 0..dims.rows {
            for c in 0..dims.cols {
                let mut n = 0;
                for ds in -1..=1 {
                    let ss = reflect(offset(s, ds), dims.depth);
                    for dr in -1..=1 {
                        let rr = reflect(offset(r, dr), dims.rows);
                        for dc in -1..=1 {
                            let cc = reflect(offset(c, dc), dims.cols);
                            window[n] = values[dims.index(ss, rr, cc)];
                            n += 1;
                        }
                    }
                }
                let (_, median, _) = window.select_nth_unstable_by(SIZE / 2, f32::total_cmp);
                out.push(*median);
            }
        }
    }
    Ok(volume.with_values(out)?)
}

#[allow(clippy::cast_possible_wrap)]
// Wrap: volume axes are far below isize::MAX
const fn offset(index: usize, delta: isize) -> isize {
    index as isize + delta
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use volume_types::{VolumeDims, VoxelSpacing};

    #[test]
    fn removes_isolated_spike() {
        let volume = Volume::from_fn(VolumeDims::new(5, 5, 5), VoxelSpacing::UNIT, |s, r, c| {
            if (s, r, c) == (2, 2, 2) {
                3000.0
            } else {
                10.0
            }
        });
        let out = median_filter(&volume).unwrap();
        assert!(out.values().iter().all(|&v| v == 10.0));
    }

    #[test]
    fn keeps_a_flat_step() {
        // A half-space edge is preserved by the median
        let volume = Volume::from_fn(VolumeDims::new(4, 4, 6), VoxelSpacing::UNIT, |_, _, c| {
            if c < 3 {
                0.0
            } else {
                1.0
            }
        });
        let out = median_filter(&volume).unwrap();
        assert_eq!(out, volume);
    }

    #[test]
    fn single_voxel_volume() {
        let volume = Volume::from_fn(VolumeDims::new(1, 1, 1), VoxelSpacing::UNIT, |_, _, _| 7.0);
        assert_eq!(median_filter(&volume).unwrap().get(0, 0, 0), Some(7.0));
    }
}
