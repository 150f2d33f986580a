//! Data model for slice-series reconstruction.
//!
//! - [`SliceRecord`] - One acquired 2D image plus its ordering and spatial metadata
//! - [`GridShape`] - The `(rows, cols)` shape of a slice grid
//! - [`Volume`] - Stacked 3D scalar field with voxel spacing
//! - [`BinaryField`] - Boolean occupancy field of the same dimensions
//!
//! # Layout
//!
//! All grids are row-major with the column index fastest. A volume voxel
//! `(slice, row, col)` lives at `col + row * cols + slice * rows * cols`.
//!
//! # Example
//!
//! ```
//! use volume_types::{GridShape, SliceGrid};
//!
//! let shape: GridShape = "64x32".parse().unwrap();
//! assert_eq!((shape.rows, shape.cols), (32, 64));
//!
//! let grid = SliceGrid::filled(shape, 0.0);
//! assert_eq!(grid.data().len(), 64 * 32);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod field;
mod shape;
mod slice;
mod volume;

pub use error::{VolumeError, VolumeResult};
pub use field::BinaryField;
pub use shape::GridShape;
pub use slice::{PixelSpacing, Rescale, SliceGrid, SliceRecord};
pub use volume::{Volume, VolumeDims, VoxelSpacing};
