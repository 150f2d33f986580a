//! Stage orchestration.

use std::path::Path;

use mesh_io::save_stl;
use mesh_types::IndexedMesh;
use mesh_render::save_preview;
use mesh_smooth::smooth_mesh;
use tracing::{info, warn};
use volume_load::{DicomSliceSource, SeriesLoader, SliceSource};
use volume_process::{build_volume, filter_volume, segment, ShapeNormalizer};
use volume_surface::{extract_surface, MarchingCubesEngine, SurfaceExtractionEngine};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::report::{RunReport, RunStats};

/// Smoothed surface and run figures, before anything is written.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Final mesh.
    pub mesh: IndexedMesh,
    /// Figures collected by the stages.
    pub stats: RunStats,
}

/// A configured reconstruction pipeline.
///
/// Holds only the validated configuration and two stateless strategies, so
/// one pipeline can serve many runs, including from several threads with
/// distinct output paths.
#[derive(Debug, Clone)]
pub struct Pipeline<S = DicomSliceSource, E = MarchingCubesEngine> {
    config: PipelineConfig,
    loader: SeriesLoader<S>,
    engine: E,
}

impl Pipeline {
    /// Pipeline reading DICOM files and extracting with marching cubes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PipelineError::InvalidParameter`] if `config` fails
    /// validation.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        Self::with_components(config, DicomSliceSource::new(), MarchingCubesEngine::new())
    }
}

impl<S: SliceSource, E: SurfaceExtractionEngine> Pipeline<S, E> {
    /// Pipeline with a custom slice source and extraction engine.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PipelineError::InvalidParameter`] if `config` fails
    /// validation.
    pub fn with_components(config: PipelineConfig, source: S, engine: E) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            loader: SeriesLoader::new(source),
            engine,
        })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and report the outcome.
    ///
    /// The mesh is written before the preview. A fatal error leaves neither
    /// file behind; a preview failure only adds a warning.
    pub fn run(&self, input: &Path, mesh_path: &Path, preview_path: &Path) -> RunReport {
        let mut warnings = Vec::new();
        match self.execute(input, mesh_path, preview_path, &mut warnings) {
            Ok((stats, preview_written)) => {
                info!(
                    mesh = %mesh_path.display(),
                    preview_written,
                    warnings = warnings.len(),
                    "Run complete"
                );
                RunReport::succeeded(
                    stats,
                    warnings,
                    mesh_path.to_path_buf(),
                    preview_written.then(|| preview_path.to_path_buf()),
                )
            }
            Err(error) => {
                warn!(kind = %error.kind(), %error, "Run failed");
                RunReport::failed(&error, warnings)
            }
        }
    }

    fn execute(
        &self,
        input: &Path,
        mesh_path: &Path,
        preview_path: &Path,
        warnings: &mut Vec<String>,
    ) -> PipelineResult<(RunStats, bool)> {
        let Reconstruction { mesh, stats } = self.reconstruct(input, warnings)?;

        save_stl(&mesh, mesh_path, self.config.stl_encoding)?;
        info!(path = %mesh_path.display(), encoding = ?self.config.stl_encoding, "Wrote mesh");

        let preview_written = match save_preview(&mesh, preview_path, &self.config.preview) {
            Ok(()) => true,
            Err(error) => {
                warn!(path = %preview_path.display(), %error, "Preview failed");
                warnings.push(format!("preview not written: {error}"));
                false
            }
        };

        Ok((stats, preview_written))
    }

    /// Run every stage up to, but not including, writing files.
    ///
    /// Non-fatal problems are appended to `warnings`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal stage error.
    pub fn reconstruct(
        &self,
        input: &Path,
        warnings: &mut Vec<String>,
    ) -> PipelineResult<Reconstruction> {
        let config = &self.config;

        let mut series = self.loader.load(input)?;
        warnings.extend(series.warnings.iter().map(ToString::to_string));

        let normalized = ShapeNormalizer::new(config.target_shape).normalize(&mut series.records)?;
        let volume = build_volume(&series.records)?;
        let filtered = filter_volume(&volume, config.filter, config.sigma)?;
        let field = segment(&filtered, config.threshold_range());

        let mut mesh = extract_surface(&self.engine, &field, volume.spacing(), config.step_size)?;
        let smoothing = smooth_mesh(&mut mesh, &config.smoothing)?;

        let dims = volume.dims();
        let spacing = volume.spacing();
        let stats = RunStats {
            slices: series.records.len(),
            skipped_files: series.warnings.len(),
            ordering: series.ordering.to_string(),
            slice_shape: normalized.target.to_string(),
            resampled_slices: normalized.resampled,
            volume_dims: [dims.depth, dims.rows, dims.cols],
            voxel_spacing: [spacing.slice, spacing.row, spacing.col],
            selected_voxels: field.count_true(),
            vertices: mesh.vertices.len(),
            faces: mesh.faces.len(),
            surface_area: mesh.surface_area(),
            max_smoothing_displacement: smoothing.max_displacement,
        };
        Ok(Reconstruction { mesh, stats })
    }
}
