//! Pipeline configuration.
//!
//! Configuration comes from defaults, an optional TOML file and command
//! line overrides, in that order. File keys:
//!
//! | Key | Type | Default |
//! |-----|------|---------|
//! | `min_threshold` | integer | 300 |
//! | `max_threshold` | integer, `"none"` or `"unbounded"` | 1500 |
//! | `filter_type` | `none`, `gaussian`, `median` | `gaussian` |
//! | `sigma` | float | 1.0 |
//! | `target_shape` | `"WIDTHxHEIGHT"` | unset |
//! | `step_size` | integer | 1 |
//! | `smoothing_iterations` | integer | 100 |
//! | `smoothing_relaxation` | float | 0.01 |
//! | `preview_width` | integer | 800 |
//! | `preview_height` | integer | 600 |
//! | `ascii_stl` | bool | false |
//!
//! Unknown keys are rejected.

use std::path::Path;

use mesh_io::StlEncoding;
use mesh_render::PreviewParams;
use mesh_smooth::SmoothParams;
use serde::Deserialize;
use volume_process::{FilterKind, ThresholdRange};
use volume_types::GridShape;

use crate::error::{PipelineError, PipelineResult};

/// Everything that controls one reconstruction run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Lowest intensity kept by the segmenter.
    pub min_threshold: i32,
    /// Highest intensity kept; `None` is unbounded.
    pub max_threshold: Option<i32>,
    /// Smoothing applied to the volume before segmentation.
    pub filter: FilterKind,
    /// Gaussian standard deviation in voxels.
    pub sigma: f64,
    /// Explicit shape for mixed-resolution series.
    pub target_shape: Option<GridShape>,
    /// Sample every `step_size`-th voxel before surface extraction.
    pub step_size: usize,
    /// Mesh smoothing.
    pub smoothing: SmoothParams,
    /// Preview image.
    pub preview: PreviewParams,
    /// STL flavour written.
    pub stl_encoding: StlEncoding,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_threshold: 300,
            max_threshold: Some(1500),
            filter: FilterKind::Gaussian,
            sigma: 1.0,
            target_shape: None,
            step_size: 1,
            smoothing: SmoothParams::default(),
            preview: PreviewParams::default(),
            stl_encoding: StlEncoding::Binary,
        }
    }
}

impl PipelineConfig {
    /// Bone-window defaults with no smoothing filter, for clean phantoms.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            filter: FilterKind::None,
            ..Self::default()
        }
    }

    /// Parse a TOML document over the defaults and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ConfigParse`] for malformed TOML or unknown
    /// keys, and [`PipelineError::InvalidParameter`] if validation fails.
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::default();
        file.apply(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::ConfigFile`] if the file cannot be read,
    /// plus everything [`PipelineConfig::from_toml_str`] returns.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Segmentation window.
    #[must_use]
    pub fn threshold_range(&self) -> ThresholdRange {
        ThresholdRange::new(self.min_threshold, self.max_threshold)
    }

    /// Check every parameter before any input is read.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameter`] naming the first
    /// offending option.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.filter == FilterKind::Gaussian && !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(PipelineError::invalid(
                "sigma",
                format!("must be a positive number for the gaussian filter, got {}", self.sigma),
            ));
        }
        if let Some(max) = self.max_threshold.filter(|&max| max < self.min_threshold) {
            return Err(PipelineError::invalid(
                "max_threshold",
                format!("{max} is below min_threshold {}", self.min_threshold),
            ));
        }
        if self.step_size == 0 {
            return Err(PipelineError::invalid("step_size", "must be at least 1"));
        }
        if let Some(shape) = self.target_shape.filter(GridShape::is_degenerate) {
            return Err(PipelineError::invalid(
                "target_shape",
                format!("{shape} has a zero dimension"),
            ));
        }
        if self.preview.width == 0 || self.preview.height == 0 {
            let name = if self.preview.width == 0 {
                "preview_width"
            } else {
                "preview_height"
            };
            return Err(PipelineError::invalid(
                name,
                format!(
                    "preview resolution {}x{} has a zero dimension",
                    self.preview.width, self.preview.height
                ),
            ));
        }
        let relaxation = self.smoothing.relaxation;
        if !relaxation.is_finite() || relaxation < 0.0 {
            return Err(PipelineError::invalid(
                "smoothing_relaxation",
                format!("must be a non-negative number, got {relaxation}"),
            ));
        }
        self.smoothing
            .validate()
            .map_err(|e| PipelineError::invalid("smoothing_relaxation", e.to_string()))?;
        Ok(())
    }
}

/// `max_threshold` as written in a file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaxThreshold {
    Value(i32),
    Keyword(String),
}

impl MaxThreshold {
    pub(crate) fn resolve(&self) -> PipelineResult<Option<i32>> {
        match self {
            Self::Value(v) => Ok(Some(*v)),
            Self::Keyword(k) => parse_max_threshold(k),
        }
    }
}

/// Parse a max threshold given as text: an integer, `none` or `unbounded`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] for anything else.
pub fn parse_max_threshold(text: &str) -> PipelineResult<Option<i32>> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("none") || text.eq_ignore_ascii_case("unbounded") {
        return Ok(None);
    }
    text.parse::<i32>().map(Some).map_err(|_| {
        PipelineError::invalid(
            "max_threshold",
            format!("'{text}' is not an integer, 'none' or 'unbounded'"),
        )
    })
}

/// On-disk configuration. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    min_threshold: Option<i32>,
    max_threshold: Option<MaxThreshold>,
    filter_type: Option<FilterKind>,
    sigma: Option<f64>,
    target_shape: Option<GridShape>,
    step_size: Option<usize>,
    smoothing_iterations: Option<u32>,
    smoothing_relaxation: Option<f64>,
    preview_width: Option<u32>,
    preview_height: Option<u32>,
    ascii_stl: Option<bool>,
}

impl ConfigFile {
    fn apply(self, config: &mut PipelineConfig) -> PipelineResult<()> {
        if let Some(v) = self.min_threshold {
            config.min_threshold = v;
        }
        if let Some(v) = self.max_threshold {
            config.max_threshold = v.resolve()?;
        }
        if let Some(v) = self.filter_type {
            config.filter = v;
        }
        if let Some(v) = self.sigma {
            config.sigma = v;
        }
        if self.target_shape.is_some() {
            config.target_shape = self.target_shape;
        }
        if let Some(v) = self.step_size {
            config.step_size = v;
        }
        if let Some(v) = self.smoothing_iterations {
            config.smoothing.iterations = v;
        }
        if let Some(v) = self.smoothing_relaxation {
            config.smoothing.relaxation = v;
        }
        if let Some(v) = self.preview_width {
            config.preview.width = v;
        }
        if let Some(v) = self.preview_height {
            config.preview.height = v;
        }
        if let Some(ascii) = self.ascii_stl {
            config.stl_encoding = if ascii {
                StlEncoding::Ascii
            } else {
                StlEncoding::Binary
            };
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_threshold, 300);
        assert_eq!(config.max_threshold, Some(1500));
        assert_eq!(config.filter, FilterKind::Gaussian);
        assert_eq!(config.sigma, 1.0);
        assert_eq!(config.target_shape, None);
        assert_eq!(config.step_size, 1);
        assert_eq!(config.smoothing.iterations, 100);
        assert_eq!((config.preview.width, config.preview.height), (800, 600));
        assert_eq!(config.stl_encoding, StlEncoding::Binary);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn full_document() {
        let config = PipelineConfig::from_toml_str(
            r#"
            min_threshold = 200
            max_threshold = "unbounded"
            filter_type = "median"
            sigma = 2.5
            target_shape = "640x480"
            step_size = 2
            smoothing_iterations = 10
            smoothing_relaxation = 0.1
            preview_width = 320
            preview_height = 240
            ascii_stl = true
            "#,
        )
        .unwrap();

        assert_eq!(config.min_threshold, 200);
        assert_eq!(config.max_threshold, None);
        assert_eq!(config.filter, FilterKind::Median);
        assert_eq!(config.target_shape, Some(GridShape::new(480, 640)));
        assert_eq!(config.step_size, 2);
        assert_eq!(config.smoothing.iterations, 10);
        assert_eq!(config.preview.width, 320);
        assert_eq!(config.stl_encoding, StlEncoding::Ascii);
    }

    #[test]
    fn integer_max_threshold() {
        let config = PipelineConfig::from_toml_str("max_threshold = 3000").unwrap();
        assert_eq!(config.max_threshold, Some(3000));
        let config = PipelineConfig::from_toml_str(r#"max_threshold = "none""#).unwrap();
        assert_eq!(config.max_threshold, None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = PipelineConfig::from_toml_str("threshold = 5").unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn bad_values_are_rejected() {
        for doc in [
            r#"filter_type = "box""#,
            r#"target_shape = "wide""#,
            r#"max_threshold = "lots""#,
            "sigma = -1.0",
            "min_threshold = 500\nmax_threshold = 100",
            "step_size = 0",
            r#"target_shape = "0x10""#,
            "preview_height = 0",
            "smoothing_relaxation = -0.5",
        ] {
            let err = PipelineConfig::from_toml_str(doc).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter, "{doc}");
        }
    }

    #[test]
    fn sigma_only_matters_for_gaussian() {
        let config = PipelineConfig::from_toml_str("filter_type = \"median\"\nsigma = 0.0").unwrap();
        assert_eq!(config.filter, FilterKind::Median);
    }

    #[test]
    fn parse_max_threshold_text() {
        assert_eq!(parse_max_threshold("1200").unwrap(), Some(1200));
        assert_eq!(parse_max_threshold(" None ").unwrap(), None);
        assert!(parse_max_threshold("1.5").is_err());
    }

    #[test]
    fn threshold_range_follows_config() {
        let range = PipelineConfig::default().threshold_range();
        assert!(range.contains(300.0));
        assert!(!range.contains(1501.0));
    }
}
