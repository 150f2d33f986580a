//! Slice-to-volume processing stages.
//!
//! The stages run in this order, each consuming the previous output:
//!
//! 1. [`ShapeNormalizer`] - resample slices whose grid shape disagrees with
//!    the series
//! 2. [`build_volume`] - apply per-slice rescale and stack into a [`Volume`]
//! 3. [`filter_volume`] - optional Gaussian or median smoothing
//! 4. [`segment`] - inclusive threshold range to a [`BinaryField`]
//!
//! # Example
//!
//! ```
//! use volume_process::{build_volume, filter_volume, segment, FilterKind, ShapeNormalizer, ThresholdRange};
//! use volume_types::{GridShape, SliceGrid, SliceRecord};
//!
//! let mut records: Vec<_> = (0..4)
//!     .map(|i| SliceRecord::new(SliceGrid::filled(GridShape::new(8, 8), 100.0 * i as f32), i))
//!     .collect();
//!
//! ShapeNormalizer::new(None).normalize(&mut records).unwrap();
//! let volume = build_volume(&records).unwrap();
//! let smoothed = filter_volume(&volume, FilterKind::Median, 1.0).unwrap();
//! let field = segment(&smoothed, ThresholdRange::new(150, None));
//! assert_eq!(field.count_true(), 2 * 64);
//! ```
//!
//! [`Volume`]: volume_types::Volume
//! [`BinaryField`]: volume_types::BinaryField

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod build;
mod error;
mod filter;
mod normalize;
mod segment;

pub use build::{build_volume, series_spacing};
pub use error::{ProcessError, ProcessResult};
pub use filter::{filter_volume, gaussian_filter, gaussian_kernel, median_filter, FilterKind};
pub use normalize::{majority_shape, resample_grid, NormalizeReport, ShapeNormalizer};
pub use segment::{segment, ThresholdRange};
