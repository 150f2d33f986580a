//! Structured run outcome.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, PipelineError};

/// Figures collected along a successful run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Slices that parsed.
    pub slices: usize,
    /// Files skipped as unreadable.
    pub skipped_files: usize,
    /// Key the slices were ordered by.
    pub ordering: String,
    /// Common slice shape, `WIDTHxHEIGHT`.
    pub slice_shape: String,
    /// Slices resampled to the common shape.
    pub resampled_slices: usize,
    /// Volume dimensions as `[depth, rows, cols]`.
    pub volume_dims: [usize; 3],
    /// Voxel spacing as `[slice, row, col]`.
    pub voxel_spacing: [f64; 3],
    /// Voxels inside the threshold window.
    pub selected_voxels: usize,
    /// Mesh vertices.
    pub vertices: usize,
    /// Mesh faces.
    pub faces: usize,
    /// Mesh surface area in physical units squared.
    pub surface_area: f64,
    /// Largest single-pass vertex displacement while smoothing.
    pub max_smoothing_displacement: f64,
}

/// Outcome of one run, success or failure.
///
/// On failure `error_kind` and `detail` are set and `stats` is absent.
/// Warnings are kept in both cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Whether the mesh was written.
    pub success: bool,
    /// Failure category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Human-readable failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Non-fatal problems: skipped files, preview failure.
    pub warnings: Vec<String>,
    /// Mesh file, when written.
    pub mesh_path: Option<PathBuf>,
    /// Preview image, when written.
    pub preview_path: Option<PathBuf>,
    /// Run figures, when successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<RunStats>,
}

impl RunReport {
    pub(crate) fn succeeded(
        stats: RunStats,
        warnings: Vec<String>,
        mesh_path: PathBuf,
        preview_path: Option<PathBuf>,
    ) -> Self {
        Self {
            success: true,
            error_kind: None,
            detail: None,
            warnings,
            mesh_path: Some(mesh_path),
            preview_path,
            stats: Some(stats),
        }
    }

    /// Report for a run that stopped at `error`.
    #[must_use]
    pub fn failed(error: &PipelineError, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            error_kind: Some(error.kind()),
            detail: Some(error.to_string()),
            warnings,
            mesh_path: None,
            preview_path: None,
            stats: None,
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error; none occur for finite statistics.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.stats, self.error_kind) {
            (Some(stats), _) => write!(
                f,
                "Reconstructed {} slices into {} vertices / {} faces ({} warnings)",
                stats.slices,
                stats.vertices,
                stats.faces,
                self.warnings.len()
            ),
            (None, Some(kind)) => write!(
                f,
                "{kind}: {}",
                self.detail.as_deref().unwrap_or("no detail")
            ),
            (None, None) => f.write_str("no result"),
        }
    }
}
