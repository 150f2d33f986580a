//! Pipeline errors and the failure taxonomy reported to callers.

use std::fmt;
use std::path::PathBuf;

use mesh_io::IoError;
use mesh_smooth::SmoothError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use volume_load::LoadError;
use volume_process::ProcessError;
use volume_surface::SurfaceError;

/// Result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Coarse failure category, stable across versions for callers that
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No file in the input parsed as a slice, or the input is unreadable.
    NoValidSlices,
    /// No common slice shape could be established.
    ShapeNormalization,
    /// Slices disagree in shape after normalization.
    ShapeMismatch,
    /// A configuration value is malformed or out of range.
    InvalidParameter,
    /// The threshold window selects no surface.
    EmptySurface,
    /// The mesh file could not be written.
    ExportIo,
}

impl ErrorKind {
    /// Name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoValidSlices => "NoValidSlices",
            Self::ShapeNormalization => "ShapeNormalization",
            Self::ShapeMismatch => "ShapeMismatch",
            Self::InvalidParameter => "InvalidParameter",
            Self::EmptySurface => "EmptySurface",
            Self::ExportIo => "ExportIo",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A configuration value failed validation.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Option name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    ConfigFile {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Loading the slice series failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Normalization, assembly or filtering failed.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Surface extraction failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Mesh smoothing failed.
    #[error(transparent)]
    Smooth(#[from] SmoothError),

    /// Writing the mesh file failed.
    #[error("cannot write mesh: {0}")]
    Export(#[from] IoError),
}

impl PipelineError {
    /// Create an `InvalidParameter` error.
    #[must_use]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Failure category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } | Self::ConfigFile { .. } | Self::ConfigParse(_) => {
                ErrorKind::InvalidParameter
            }
            Self::Load(_) => ErrorKind::NoValidSlices,
            Self::Process(e) => match e {
                ProcessError::EmptySeries
                | ProcessError::InvalidTarget { .. }
                | ProcessError::Resample { .. } => ErrorKind::ShapeNormalization,
                ProcessError::ShapeMismatch { .. } | ProcessError::Volume(_) => {
                    ErrorKind::ShapeMismatch
                }
                ProcessError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            },
            Self::Surface(e) => match e {
                SurfaceError::EmptySurface { .. } => ErrorKind::EmptySurface,
                SurfaceError::InvalidParameter { .. } | SurfaceError::TooManyVertices { .. } => {
                    ErrorKind::InvalidParameter
                }
            },
            Self::Smooth(SmoothError::InvalidParameter { .. }) => ErrorKind::InvalidParameter,
            Self::Smooth(SmoothError::InvalidMesh(_)) => ErrorKind::EmptySurface,
            Self::Export(_) => ErrorKind::ExportIo,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use volume_types::GridShape;

    #[test]
    fn kind_mapping() {
        let load = PipelineError::from(LoadError::NoValidSlices {
            dir: PathBuf::from("in"),
            skipped: 3,
        });
        assert_eq!(load.kind(), ErrorKind::NoValidSlices);

        let mismatch = PipelineError::from(ProcessError::ShapeMismatch {
            index: 1,
            expected: GridShape::new(2, 2),
            found: GridShape::new(3, 3),
        });
        assert_eq!(mismatch.kind(), ErrorKind::ShapeMismatch);

        let empty = PipelineError::from(SurfaceError::EmptySurface {
            selected: 0,
            total: 8,
        });
        assert_eq!(empty.kind(), ErrorKind::EmptySurface);

        let export = PipelineError::from(IoError::invalid_content("x"));
        assert_eq!(export.kind(), ErrorKind::ExportIo);

        assert_eq!(
            PipelineError::from(ProcessError::EmptySeries).kind(),
            ErrorKind::ShapeNormalization
        );
    }

    #[test]
    fn kind_serializes_by_name() {
        let json = serde_json::to_string(&ErrorKind::EmptySurface).unwrap();
        assert_eq!(json, "\"EmptySurface\"");
        assert_eq!(ErrorKind::ExportIo.to_string(), "ExportIo");
    }
}
