//! Slice shape normalization.
//!
//! Series assembled from mixed sources sometimes carry slices at more than
//! one resolution. The normalizer picks one target shape and resamples the
//! outliers to it so the series can be stacked.

use std::collections::BTreeMap;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use tracing::{debug, info};
use volume_types::{GridShape, SliceGrid, SliceRecord};

use crate::error::{ProcessError, ProcessResult};

/// Outcome of a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Shape every slice has after the pass.
    pub target: GridShape,
    /// Number of slices that were resampled.
    pub resampled: usize,
    /// Number of distinct shapes seen before the pass.
    pub groups: usize,
}

impl NormalizeReport {
    /// Whether the pass changed nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.resampled == 0
    }
}

/// Brings every slice of a series to a common grid shape.
///
/// When the series holds a single shape the pass leaves it alone, even if
/// an explicit target is configured. With several shapes the explicit
/// target wins, otherwise the most common shape does; ties go to the
/// smaller `(rows, cols)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeNormalizer {
    target: Option<GridShape>,
}

impl ShapeNormalizer {
    /// Create a normalizer with an optional explicit target shape.
    #[must_use]
    pub const fn new(target: Option<GridShape>) -> Self {
        Self { target }
    }

    /// The configured target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<GridShape> {
        self.target
    }

    /// Resample slices in place so they all share one shape.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::EmptySeries`] for an empty slice list,
    /// [`ProcessError::InvalidTarget`] if the explicit target has a zero
    /// dimension, and [`ProcessError::Resample`] if a grid cannot be
    /// resampled.
    pub fn normalize(&self, records: &mut [SliceRecord]) -> ProcessResult<NormalizeReport> {
        let counts = shape_counts(records);
        let majority = majority_from_counts(&counts).ok_or(ProcessError::EmptySeries)?;

        if let Some(shape) = self.target.filter(|s| s.is_degenerate()) {
            return Err(ProcessError::InvalidTarget { shape });
        }

        if counts.len() == 1 {
            debug!(shape = %majority, "Slice shapes already uniform");
            return Ok(NormalizeReport {
                target: majority,
                resampled: 0,
                groups: 1,
            });
        }

        let target = self.target.unwrap_or(majority);
        info!(
            groups = counts.len(),
            target = %target,
            explicit = self.target.is_some(),
            "Normalizing slice shapes"
        );

        let mut resampled = 0;
        for (index, record) in records.iter_mut().enumerate() {
            let from = record.shape();
            if from == target {
                continue;
            }
            record.grid = resample_grid(&record.grid, target).map_err(|reason| {
                ProcessError::Resample {
                    index,
                    from,
                    to: target,
                    reason,
                }
            })?;
            debug!(index, from = %from, to = %target, "Resampled slice");
            resampled += 1;
        }

        Ok(NormalizeReport {
            target,
            resampled,
            groups: counts.len(),
        })
    }
}

fn shape_counts(records: &[SliceRecord]) -> BTreeMap<GridShape, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.shape()).or_insert(0) += 1;
    }
    counts
}

fn majority_from_counts(counts: &BTreeMap<GridShape, usize>) -> Option<GridShape> {
    // BTreeMap iterates in ascending shape order; keep the first maximum.
    let mut best: Option<(GridShape, usize)> = None;
    for (&shape, &count) in counts {
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((shape, count));
        }
    }
    best.map(|(shape, _)| shape)
}

/// The most common shape in a series, ties broken toward the smaller
/// `(rows, cols)`. `None` for an empty series.
#[must_use]
pub fn majority_shape(records: &[SliceRecord]) -> Option<GridShape> {
    majority_from_counts(&shape_counts(records))
}

/// Resample a grid to `target` with a Lanczos kernel.
///
/// Values are mapped to the unit interval for the resize and mapped back
/// afterwards, so the result stays inside the input's value range. A
/// constant grid resamples to the same constant.
///
/// # Errors
///
/// Returns a description of the failure if either shape does not fit the
/// image backend.
pub fn resample_grid(grid: &SliceGrid, target: GridShape) -> Result<SliceGrid, String> {
    let from = grid.shape();
    if from == target {
        return Ok(grid.clone());
    }
    if from.is_degenerate() || target.is_degenerate() {
        return Err(format!("cannot resample between {from} and {target}"));
    }

    let (lo, hi) = grid
        .data()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if hi <= lo {
        return Ok(SliceGrid::filled(target, if lo.is_finite() { lo } else { 0.0 }));
    }
    let range = hi - lo;

    let width = dimension(from.cols)?;
    let height = dimension(from.rows)?;
    let unit: Vec<f32> = grid.data().iter().map(|&v| (v - lo) / range).collect();
    let source: ImageBuffer<Luma<f32>, Vec<f32>> = ImageBuffer::from_raw(width, height, unit)
        .ok_or_else(|| format!("buffer does not match {from}"))?;

    let resized = imageops::resize(
        &source,
        dimension(target.cols)?,
        dimension(target.rows)?,
        FilterType::Lanczos3,
    );

    let data = resized
        .into_raw()
        .into_iter()
        .map(|u| u.clamp(0.0, 1.0).mul_add(range, lo))
        .collect();
    SliceGrid::new(target, data).map_err(|e| e.to_string())
}

fn dimension(n: usize) -> Result<u32, String> {
    u32::try_from(n).map_err(|_| format!("dimension {n} exceeds image limits"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(rows: usize, cols: usize, value: f32, arrival: usize) -> SliceRecord {
        SliceRecord::new(SliceGrid::filled(GridShape::new(rows, cols), value), arrival)
    }

    #[test]
    fn uniform_series_is_untouched() {
        let mut records = vec![record(4, 4, 1.0, 0), record(4, 4, 2.0, 1)];
        let before = records.clone();

        let report = ShapeNormalizer::new(None).normalize(&mut records).unwrap();
        assert!(report.is_noop());
        assert_eq!(report.groups, 1);
        assert_eq!(records, before);
    }

    #[test]
    fn uniform_series_ignores_explicit_target() {
        let mut records = vec![record(4, 4, 1.0, 0), record(4, 4, 2.0, 1)];
        let report = ShapeNormalizer::new(Some(GridShape::new(8, 8)))
            .normalize(&mut records)
            .unwrap();
        assert!(report.is_noop());
        assert!(records.iter().all(|r| r.shape() == GridShape::new(4, 4)));
    }

    #[test]
    fn majority_shape_wins() {
        let mut records = vec![
            record(8, 8, 10.0, 0),
            record(4, 4, 20.0, 1),
            record(8, 8, 30.0, 2),
        ];
        let report = ShapeNormalizer::new(None).normalize(&mut records).unwrap();

        assert_eq!(report.target, GridShape::new(8, 8));
        assert_eq!(report.resampled, 1);
        assert_eq!(report.groups, 2);
        assert!(records.iter().all(|r| r.shape() == GridShape::new(8, 8)));
        // Constant slice stays constant after resampling
        assert!(records[1].grid.data().iter().all(|&v| v == 20.0));
    }

    #[test]
    fn tie_goes_to_smaller_shape() {
        let records = vec![record(6, 6, 0.0, 0), record(3, 9, 0.0, 1)];
        assert_eq!(majority_shape(&records), Some(GridShape::new(3, 9)));
    }

    #[test]
    fn explicit_target_wins_over_majority() {
        let mut records = vec![
            record(8, 8, 1.0, 0),
            record(8, 8, 1.0, 1),
            record(4, 4, 1.0, 2),
        ];
        let target = GridShape::new(5, 6);
        let report = ShapeNormalizer::new(Some(target))
            .normalize(&mut records)
            .unwrap();
        assert_eq!(report.target, target);
        assert_eq!(report.resampled, 3);
        assert!(records.iter().all(|r| r.shape() == target));
    }

    #[test]
    fn empty_series_is_an_error() {
        let err = ShapeNormalizer::new(None).normalize(&mut []).unwrap_err();
        assert_eq!(err, ProcessError::EmptySeries);
    }

    #[test]
    fn degenerate_target_is_rejected() {
        let mut records = vec![record(4, 4, 1.0, 0), record(2, 2, 1.0, 1)];
        let err = ShapeNormalizer::new(Some(GridShape::new(0, 4)))
            .normalize(&mut records)
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidTarget { .. }));
    }

    #[test]
    fn resample_stays_within_input_range() {
        let grid = SliceGrid::from_fn(GridShape::new(6, 6), |r, c| {
            if (r + c) % 2 == 0 {
                -1000.0
            } else {
                1000.0
            }
        });
        let out = resample_grid(&grid, GridShape::new(13, 11)).unwrap();
        assert_eq!(out.shape(), GridShape::new(13, 11));
        assert!(out.data().iter().all(|&v| (-1000.0..=1000.0).contains(&v)));
    }

    #[test]
    fn resample_preserves_a_step_edge() {
        let grid = SliceGrid::from_fn(GridShape::new(8, 8), |_, c| if c < 4 { 0.0 } else { 500.0 });
        let out = resample_grid(&grid, GridShape::new(16, 16)).unwrap();
        assert!(out.get(8, 0).unwrap() < 50.0);
        assert!(out.get(8, 15).unwrap() > 450.0);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(
            shapes in proptest::collection::vec((1usize..6, 1usize..6), 1..6)
        ) {
            let mut records: Vec<_> = shapes
                .iter()
                .enumerate()
                .map(|(i, &(r, c))| {
                    SliceRecord::new(
                        SliceGrid::from_fn(GridShape::new(r, c), |y, x| (y * 7 + x) as f32),
                        i,
                    )
                })
                .collect();

            let normalizer = ShapeNormalizer::new(None);
            let first = normalizer.normalize(&mut records).unwrap();
            let after_first = records.clone();
            let second = normalizer.normalize(&mut records).unwrap();

            prop_assert!(records.iter().all(|r| r.shape() == first.target));
            prop_assert!(second.is_noop());
            prop_assert_eq!(second.target, first.target);
            prop_assert_eq!(records, after_first);
        }
    }
}
