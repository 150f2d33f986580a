//! Stacked 3D scalar field.

use crate::error::{VolumeError, VolumeResult};
use crate::shape::GridShape;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions of a volume: slices, rows, columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeDims {
    /// Number of slices.
    pub depth: usize,
    /// Rows per slice.
    pub rows: usize,
    /// Columns per slice.
    pub cols: usize,
}

impl VolumeDims {
    /// Create dimensions.
    #[must_use]
    pub const fn new(depth: usize, rows: usize, cols: usize) -> Self {
        Self { depth, rows, cols }
    }

    /// Total voxel count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.depth * self.rows * self.cols
    }

    /// True if any axis is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// In-plane shape.
    #[must_use]
    pub const fn slice_shape(&self) -> GridShape {
        GridShape::new(self.rows, self.cols)
    }

    /// Flat index of `(slice, row, col)`.
    #[inline]
    #[must_use]
    pub const fn index(&self, slice: usize, row: usize, col: usize) -> usize {
        col + self.cols * (row + self.rows * slice)
    }
}

/// Physical distance between voxel centers along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelSpacing {
    /// Spacing between slices (slice thickness).
    pub slice: f64,
    /// Spacing between rows.
    pub row: f64,
    /// Spacing between columns.
    pub col: f64,
}

impl VoxelSpacing {
    /// Unit spacing on every axis.
    pub const UNIT: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a spacing vector.
    #[must_use]
    pub const fn new(slice: f64, row: f64, col: f64) -> Self {
        Self { slice, row, col }
    }

    /// Spacing multiplied uniformly by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.slice * factor, self.row * factor, self.col * factor)
    }
}

impl Default for VoxelSpacing {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A 3D scalar field built from stacked slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    dims: VolumeDims,
    values: Vec<f32>,
    spacing: VoxelSpacing,
}

impl Volume {
    /// Wrap a value buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::LengthMismatch`] if `values` does not hold
    /// exactly `dims.len()` samples.
    pub fn new(dims: VolumeDims, values: Vec<f32>, spacing: VoxelSpacing) -> VolumeResult<Self> {
        if values.len() != dims.len() {
            return Err(VolumeError::LengthMismatch {
                expected: dims.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            dims,
            values,
            spacing,
        })
    }

    /// A volume whose value at `(slice, row, col)` is `f(slice, row, col)`.
    pub fn from_fn(
        dims: VolumeDims,
        spacing: VoxelSpacing,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Self {
        let mut values = Vec::with_capacity(dims.len());
        for s in 0..dims.depth {
            for r in 0..dims.rows {
                for c in 0..dims.cols {
                    values.push(f(s, r, c));
                }
            }
        }
        Self {
            dims,
            values,
            spacing,
        }
    }

    /// Dimensions.
    #[must_use]
    pub const fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// Voxel spacing.
    #[must_use]
    pub const fn spacing(&self) -> VoxelSpacing {
        self.spacing
    }

    /// Values in flat order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(slice, row, col)`, `None` if out of bounds.
    #[must_use]
    pub fn get(&self, slice: usize, row: usize, col: usize) -> Option<f32> {
        let d = self.dims;
        (slice < d.depth && row < d.rows && col < d.cols)
            .then(|| self.values[d.index(slice, row, col)])
    }

    /// A volume with the same dimensions and spacing but new values.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::LengthMismatch`] if the buffer size differs.
    pub fn with_values(&self, values: Vec<f32>) -> VolumeResult<Self> {
        Self::new(self.dims, values, self.spacing)
    }

    /// Smallest and largest value, `None` for an empty volume.
    #[must_use]
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut it = self.values.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
