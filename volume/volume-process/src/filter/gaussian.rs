//! Separable Gaussian blur.

use volume_types::{Volume, VolumeDims};

use super::reflect;
use crate::error::{ProcessError, ProcessResult};

/// Kernel support in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Normalized 1D Gaussian weights for `sigma`, covering
/// `-radius..=radius` with `radius = round(4 * sigma)`.
///
/// # Errors
///
/// Returns [`ProcessError::InvalidParameter`] unless `sigma` is positive
/// and finite.
pub fn gaussian_kernel(sigma: f64) -> ProcessResult<Vec<f64>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ProcessError::InvalidParameter {
            name: "sigma",
            reason: format!("must be a positive number, got {sigma}"),
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation: radius is a small non-negative voxel count
    let radius = (TRUNCATE * sigma).round() as usize;

    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 - radius as f64;
            (-0.5 * (x / sigma).powi(2)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    Ok(weights)
}

/// Blur each axis in turn with a Gaussian of standard deviation `sigma`
/// voxels. Spacing is ignored.
///
/// # Errors
///
/// Returns [`ProcessError::InvalidParameter`] unless `sigma` is positive
/// and finite.
pub fn gaussian_filter(volume: &Volume, sigma: f64) -> ProcessResult<Volume> {
    let kernel = gaussian_kernel(sigma)?;
    let dims = volume.dims();

    let mut values = volume.values().to_vec();
    for axis in Axis::ALL {
        values = convolve_axis(&values, dims, axis, &kernel);
    }
    Ok(volume.with_values(values)?)
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Slice,
    Row,
    Col,
}

impl Axis {
    const ALL: [Self; 3] = [Self::Col, Self::Row, Self::Slice];

    /// Length of the axis and the flat-index stride between neighbours.
    const fn extent(self, dims: VolumeDims) -> (usize, usize) {
        match self {
            Self::Slice => (dims.depth, dims.rows * dims.cols),
            Self::Row => (dims.rows, dims.cols),
            Self::Col => (dims.cols, 1),
        }
    }
}

fn convolve_axis(values: &[f32], dims: VolumeDims, axis: Axis, kernel: &[f64]) -> Vec<f32> {
    let (len, stride) = axis.extent(dims);
    let mut out = vec![0.0f32; values.len()];
    if len == 0 {
        return out;
    }

    #[allow(clippy::cast_possible_wrap)]
    let radius = (kernel.len() / 2) as isize;
    let mut line = vec![0.0f64; len];

    for start in line_starts(dims, axis) {
        for (i, slot) in line.iter_mut().enumerate() {
            *slot = f64::from(values[start + i * stride]);
        }
        for i in 0..len {
            #[allow(clippy::cast_possible_wrap)]
            let centre = i as isize;
            let acc: f64 = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    #[allow(clippy::cast_possible_wrap)]
                    let offset = k as isize - radius;
                    w * line[reflect(centre + offset, len)]
                })
                .sum();
            #[allow(clippy::cast_possible_truncation)]
            // Truncation: volumes are stored in single precision
            let value = acc as f32;
            out[start + i * stride] = value;
        }
    }
    out
}

/// Flat index of the first sample of every line along `axis`.
fn line_starts(dims: VolumeDims, axis: Axis) -> Vec<usize> {
    match axis {
        Axis::Col => (0..dims.depth * dims.rows).map(|l| l * dims.cols).collect(),
        Axis::Row => (0..dims.depth)
            .flat_map(|s| (0..dims.cols).map(move |c| dims.index(s, 0, c)))
            .collect(),
        Axis::Slice => (0..dims.rows * dims.cols).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use volume_types::VoxelSpacing;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let kernel = gaussian_kernel(1.0).unwrap();
        assert_eq!(kernel.len(), 9);
        assert_relative_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        for i in 0..kernel.len() / 2 {
            assert_relative_eq!(kernel[i], kernel[kernel.len() - 1 - i]);
        }
        assert!(kernel[4] > kernel[3]);
    }

    #[test]
    fn small_sigma_has_short_support() {
        assert_eq!(gaussian_kernel(0.1).unwrap(), vec![1.0]);
        assert_eq!(gaussian_kernel(0.5).unwrap().len(), 5);
    }

    #[test]
    fn constant_volume_is_unchanged() {
        let volume = Volume::from_fn(VolumeDims::new(3, 4, 5), VoxelSpacing::UNIT, |_, _, _| 42.0);
        let out = gaussian_filter(&volume, 1.5).unwrap();
        for &v in out.values() {
            assert_relative_eq!(v, 42.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn impulse_spreads_evenly() {
        let dims = VolumeDims::new(9, 9, 9);
        let volume = Volume::from_fn(dims, VoxelSpacing::UNIT, |s, r, c| {
            if (s, r, c) == (4, 4, 4) {
                1000.0
            } else {
                0.0
            }
        });
        let out = gaussian_filter(&volume, 1.0).unwrap();

        let centre = out.get(4, 4, 4).unwrap();
        assert!(centre < 1000.0);
        // Face neighbours along each axis receive the same weight
        let a = out.get(3, 4, 4).unwrap();
        let b = out.get(4, 3, 4).unwrap();
        let c = out.get(4, 4, 5).unwrap();
        assert_relative_eq!(a, b, epsilon = 1e-4);
        assert_relative_eq!(b, c, epsilon = 1e-4);
        assert!(a < centre);
        // Total mass is conserved away from the border
        let total: f32 = out.values().iter().sum();
        assert_relative_eq!(total, 1000.0, epsilon = 0.5);
    }

    #[test]
    fn blur_along_rows_only_when_varying_by_row() {
        let dims = VolumeDims::new(2, 6, 3);
        let volume = Volume::from_fn(dims, VoxelSpacing::UNIT, |_, r, _| if r < 3 { 0.0 } else { 10.0 });
        let out = gaussian_filter(&volume, 1.0).unwrap();
        // Columns and slices are constant, so they stay equal
        assert_relative_eq!(out.get(0, 2, 0).unwrap(), out.get(1, 2, 2).unwrap(), epsilon = 1e-5);
        assert!(out.get(0, 2, 0).unwrap() > 0.0);
        assert!(out.get(0, 3, 0).unwrap() < 10.0);
    }
}
