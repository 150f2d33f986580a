//! Volume smoothing filters.
//!
//! Both filters treat the volume border by mirroring: the sample just past
//! an edge repeats the edge sample (`d c b a | a b c d | d c b a`).

mod gaussian;
mod median;

use std::fmt;
use std::str::FromStr;

use tracing::info;
use volume_types::Volume;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ProcessError, ProcessResult};

pub use gaussian::{gaussian_filter, gaussian_kernel};
pub use median::median_filter;

/// Which smoothing filter to run before segmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FilterKind {
    /// Pass the volume through unchanged.
    None,
    /// Separable Gaussian blur with standard deviation `sigma` voxels.
    #[default]
    Gaussian,
    /// 3x3x3 median.
    Median,
}

impl FilterKind {
    /// Lowercase name used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gaussian => "gaussian",
            Self::Median => "median",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "gaussian" => Ok(Self::Gaussian),
            "median" => Ok(Self::Median),
            other => Err(ProcessError::InvalidParameter {
                name: "filter",
                reason: format!("unknown filter '{other}', expected none, gaussian or median"),
            }),
        }
    }
}

/// Run the selected filter. `sigma` is only read for
/// [`FilterKind::Gaussian`].
///
/// # Errors
///
/// Returns [`ProcessError::InvalidParameter`] if the Gaussian `sigma` is
/// not a positive finite number.
pub fn filter_volume(volume: &Volume, kind: FilterKind, sigma: f64) -> ProcessResult<Volume> {
    let filtered = match kind {
        FilterKind::None => volume.clone(),
        FilterKind::Gaussian => gaussian_filter(volume, sigma)?,
        FilterKind::Median => median_filter(volume)?,
    };
    info!(filter = %kind, sigma, "Filtered volume");
    Ok(filtered)
}

/// Map a possibly out-of-range index onto `0..len` by mirroring about the
/// outer edge of the end samples.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
// Wrap: volume axes are far below isize::MAX
fn reflect(index: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let m = index.rem_euclid(period);
    (if m >= len { period - 1 - m } else { m }) as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use volume_types::{VolumeDims, VoxelSpacing};

    #[test]
    fn reflect_mirrors_about_edges() {
        let mapped: Vec<usize> = (-4..8).map(|i| reflect(i, 4)).collect();
        assert_eq!(mapped, vec![3, 2, 1, 0, 0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(reflect(-3, 1), 0);
        assert_eq!(reflect(9, 1), 0);
    }

    #[test]
    fn parse_filter_kind() {
        assert_eq!("Gaussian".parse::<FilterKind>().unwrap(), FilterKind::Gaussian);
        assert_eq!(" median ".parse::<FilterKind>().unwrap(), FilterKind::Median);
        assert_eq!("none".parse::<FilterKind>().unwrap(), FilterKind::None);
        assert!("box".parse::<FilterKind>().is_err());
        assert_eq!(FilterKind::default(), FilterKind::Gaussian);
    }

    #[test]
    fn none_is_identity() {
        let volume = Volume::from_fn(VolumeDims::new(2, 3, 4), VoxelSpacing::UNIT, |s, r, c| {
            (s * 12 + r * 4 + c) as f32
        });
        assert_eq!(filter_volume(&volume, FilterKind::None, -1.0).unwrap(), volume);
    }

    #[test]
    fn gaussian_rejects_bad_sigma() {
        let volume = Volume::from_fn(VolumeDims::new(2, 2, 2), VoxelSpacing::UNIT, |_, _, _| 1.0);
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(filter_volume(&volume, FilterKind::Gaussian, sigma).is_err());
        }
    }
}
