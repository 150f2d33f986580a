//! Slice records as read from a series.

use std::path::PathBuf;

use crate::error::{VolumeError, VolumeResult};
use crate::shape::GridShape;

/// A 2D intensity grid, row-major with the column index fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceGrid {
    shape: GridShape,
    data: Vec<f32>,
}

impl SliceGrid {
    /// Wrap a sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::LengthMismatch`] if `data` does not hold
    /// exactly `shape.area()` samples.
    pub fn new(shape: GridShape, data: Vec<f32>) -> VolumeResult<Self> {
        if data.len() != shape.area() {
            return Err(VolumeError::LengthMismatch {
                expected: shape.area(),
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// A grid with every sample set to `value`.
    #[must_use]
    pub fn filled(shape: GridShape, value: f32) -> Self {
        Self {
            shape,
            data: vec![value; shape.area()],
        }
    }

    /// A grid whose sample at `(row, col)` is `f(row, col)`.
    pub fn from_fn(shape: GridShape, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(shape.area());
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                data.push(f(row, col));
            }
        }
        Self { shape, data }
    }

    /// Grid shape.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Samples in row-major order.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable samples in row-major order.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Sample at `(row, col)`, `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.shape.rows && col < self.shape.cols)
            .then(|| self.data[row * self.shape.cols + col])
    }

    /// Consume the grid, returning its samples.
    #[must_use]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

/// Linear calibration from stored values to physical intensity units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    /// Multiplier.
    pub slope: f64,
    /// Offset added after scaling.
    pub intercept: f64,
}

impl Rescale {
    /// Apply `value * slope + intercept`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: volumes are stored in single precision
    pub fn apply(&self, value: f32) -> f32 {
        f64::from(value).mul_add(self.slope, self.intercept) as f32
    }
}

/// In-plane sample spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    /// Distance between adjacent rows.
    pub row: f64,
    /// Distance between adjacent columns.
    pub col: f64,
}

/// One acquired slice: intensity grid plus optional metadata.
///
/// Fields left `None` were absent from the source file. Consumers apply
/// these defaults:
///
/// - no `rescale`: intensities pass through unchanged
/// - no `pixel_spacing` or no `slice_thickness`: unit voxel spacing
/// - no ordering keys: discovery order (`arrival`)
#[derive(Debug, Clone, PartialEq)]
pub struct SliceRecord {
    /// Intensity samples.
    pub grid: SliceGrid,
    /// Position of the slice along the stacking axis.
    pub slice_location: Option<f64>,
    /// Acquisition instance number.
    pub instance_number: Option<i32>,
    /// Zero-based position in discovery order.
    pub arrival: usize,
    /// Linear intensity calibration.
    pub rescale: Option<Rescale>,
    /// In-plane spacing.
    pub pixel_spacing: Option<PixelSpacing>,
    /// Nominal slice thickness.
    pub slice_thickness: Option<f64>,
    /// File the record was read from.
    pub source: PathBuf,
}

impl SliceRecord {
    /// A record with only a grid and discovery position.
    #[must_use]
    pub fn new(grid: SliceGrid, arrival: usize) -> Self {
        Self {
            grid,
            slice_location: None,
            instance_number: None,
            arrival,
            rescale: None,
            pixel_spacing: None,
            slice_thickness: None,
            source: PathBuf::new(),
        }
    }

    /// Set the slice location.
    #[must_use]
    pub fn with_slice_location(mut self, location: f64) -> Self {
        self.slice_location = Some(location);
        self
    }

    /// Set the instance number.
    #[must_use]
    pub fn with_instance_number(mut self, number: i32) -> Self {
        self.instance_number = Some(number);
        self
    }

    /// Set the rescale parameters.
    #[must_use]
    pub fn with_rescale(mut self, slope: f64, intercept: f64) -> Self {
        self.rescale = Some(Rescale { slope, intercept });
        self
    }

    /// Set pixel spacing and slice thickness.
    #[must_use]
    pub fn with_spacing(mut self, row: f64, col: f64, thickness: f64) -> Self {
        self.pixel_spacing = Some(PixelSpacing { row, col });
        self.slice_thickness = Some(thickness);
        self
    }

    /// Set the source path.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Shape of the record's grid.
    #[must_use]
    pub const fn shape(&self) -> GridShape {
        self.grid.shape()
    }
}
