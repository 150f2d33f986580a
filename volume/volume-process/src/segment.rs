//! Threshold segmentation.

use std::fmt;

use tracing::info;
use volume_types::{BinaryField, Volume};

/// Inclusive intensity window `[min, max]`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRange {
    /// Lowest value kept.
    pub min: f64,
    /// Highest value kept.
    pub max: Option<f64>,
}

impl ThresholdRange {
    /// Window from integer bounds, as configured.
    #[must_use]
    pub fn new(min: i32, max: Option<i32>) -> Self {
        Self {
            min: f64::from(min),
            max: max.map(f64::from),
        }
    }

    /// Whether `value` falls inside the window. NaN never does.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        let v = f64::from(value);
        v >= self.min && self.max.map_or(true, |max| v <= max)
    }
}

impl fmt::Display for ThresholdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, inf)", self.min),
        }
    }
}

/// Mark every voxel whose value lies inside `range`.
///
/// An inverted window (`max < min`) selects nothing.
#[must_use]
pub fn segment(volume: &Volume, range: ThresholdRange) -> BinaryField {
    let dims = volume.dims();
    let values = volume.values();
    let field = BinaryField::from_fn(dims, |s, r, c| range.contains(values[dims.index(s, r, c)]));

    info!(
        range = %range,
        selected = field.count_true(),
        total = dims.len(),
        "Segmented volume"
    );
    field
}
