//! Boolean occupancy field.

use crate::error::{VolumeError, VolumeResult};
use crate::volume::VolumeDims;

/// Boolean 3D field with the layout of a [`Volume`](crate::Volume).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryField {
    dims: VolumeDims,
    cells: Vec<bool>,
}

impl BinaryField {
    /// Wrap a cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::LengthMismatch`] if `cells` does not hold
    /// exactly `dims.len()` entries.
    pub fn new(dims: VolumeDims, cells: Vec<bool>) -> VolumeResult<Self> {
        if cells.len() != dims.len() {
            return Err(VolumeError::LengthMismatch {
                expected: dims.len(),
                got: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    /// A field whose cell at `(slice, row, col)` is `f(slice, row, col)`.
    pub fn from_fn(dims: VolumeDims, mut f: impl FnMut(usize, usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(dims.len());
        for s in 0..dims.depth {
            for r in 0..dims.rows {
                for c in 0..dims.cols {
                    cells.push(f(s, r, c));
                }
            }
        }
        Self { dims, cells }
    }

    /// A field with every cell set to `value`.
    #[must_use]
    pub fn filled(dims: VolumeDims, value: bool) -> Self {
        Self {
            dims,
            cells: vec![value; dims.len()],
        }
    }

    /// Dimensions.
    #[must_use]
    pub const fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// Cells in flat order.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Cell at `(slice, row, col)`; out-of-bounds cells read as `false`.
    #[inline]
    #[must_use]
    pub fn get(&self, slice: usize, row: usize, col: usize) -> bool {
        let d = self.dims;
        slice < d.depth && row < d.rows && col < d.cols && self.cells[d.index(slice, row, col)]
    }

    /// Number of `true` cells.
    #[must_use]
    pub fn count_true(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Keep every `step`-th cell along each axis, starting at index 0.
    ///
    /// Each axis of length `n` becomes `ceil(n / step)`. A `step` of 0 or 1
    /// returns a copy.
    #[must_use]
    pub fn decimate(&self, step: usize) -> Self {
        if step <= 1 {
            return self.clone();
        }
        let d = self.dims;
        let dims = VolumeDims::new(
            d.depth.div_ceil(step),
            d.rows.div_ceil(step),
            d.cols.div_ceil(step),
        );
        Self::from_fn(dims, |s, r, c| self.get(s * step, r * step, c * step))
    }
}
