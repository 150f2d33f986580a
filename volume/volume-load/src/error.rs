//! Error types for series loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for series loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for parsing one slice file.
pub type SliceReadResult<T> = Result<T, SliceReadError>;

/// Fatal series loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input directory could not be listed.
    #[error("cannot read slice directory {path}: {source}")]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// No file in the directory parsed as a slice.
    #[error("no valid slices in {dir} ({skipped} files skipped)")]
    NoValidSlices {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Number of files that failed to parse.
        skipped: usize,
    },
}

/// Why a single file could not be read as a slice.
///
/// These are recovered by the loader and reported as warnings.
#[derive(Debug, Error)]
pub enum SliceReadError {
    /// The file is not a readable DICOM object.
    #[error("not a DICOM file: {0}")]
    Dicom(#[from] dicom_object::ReadError),

    /// A required element is absent.
    #[error("missing required element {name}")]
    MissingElement {
        /// Element keyword.
        name: &'static str,
    },

    /// An element is present but its value is unusable.
    #[error("invalid {name}: {reason}")]
    InvalidElement {
        /// Element keyword.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The file is valid but uses an encoding this reader does not decode.
    #[error("unsupported slice encoding: {reason}")]
    Unsupported {
        /// Description of the unsupported feature.
        reason: String,
    },

    /// I/O error reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SliceReadError {
    /// Create an `InvalidElement` error.
    #[must_use]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidElement {
            name,
            reason: reason.into(),
        }
    }

    /// Create an `Unsupported` error.
    #[must_use]
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }
}
