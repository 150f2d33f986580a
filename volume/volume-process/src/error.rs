//! Error types for volume processing.

use thiserror::Error;
use volume_types::{GridShape, VolumeError};

/// Result type for volume processing.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors raised by the processing stages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    /// There are no slices to normalize or stack.
    #[error("series contains no slices")]
    EmptySeries,

    /// The requested target shape has a zero dimension.
    #[error("target shape {shape} has a zero dimension")]
    InvalidTarget {
        /// The rejected shape.
        shape: GridShape,
    },

    /// A slice grid could not be resampled.
    #[error("cannot resample slice {index} from {from} to {to}: {reason}")]
    Resample {
        /// Position of the slice in the series.
        index: usize,
        /// Original shape.
        from: GridShape,
        /// Requested shape.
        to: GridShape,
        /// What went wrong.
        reason: String,
    },

    /// A slice shape differs from the first slice when stacking.
    #[error("slice {index} has shape {found}, expected {expected}")]
    ShapeMismatch {
        /// Position of the slice in the series.
        index: usize,
        /// Shape of the first slice.
        expected: GridShape,
        /// Shape of the offending slice.
        found: GridShape,
    },

    /// A processing parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Volume construction failed.
    #[error(transparent)]
    Volume(#[from] VolumeError),
}
