//! Slice grid shape.

use std::fmt;
use std::str::FromStr;

use crate::error::VolumeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a 2D slice grid.
///
/// Ordering compares `(rows, cols)` lexicographically, which is the
/// tie-break used when two shapes are equally common in a series.
///
/// The text form is `WIDTHxHEIGHT`, i.e. columns first:
///
/// ```
/// use volume_types::GridShape;
///
/// let shape = GridShape::new(480, 640);
/// assert_eq!(shape.to_string(), "640x480");
/// assert_eq!("640x480".parse::<GridShape>().unwrap(), shape);
/// assert!(GridShape::new(32, 64) < GridShape::new(64, 32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct GridShape {
    /// Number of rows (height).
    pub rows: usize,
    /// Number of columns (width).
    pub cols: usize,
}

impl GridShape {
    /// Create a shape from row and column counts.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of samples in a grid of this shape.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// True if either dimension is zero.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

impl FromStr for GridShape {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VolumeError::ParseShape {
            input: s.to_string(),
        };
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(err)?;
        let cols = w.trim().parse().map_err(|_| err())?;
        let rows = h.trim().parse().map_err(|_| err())?;
        Ok(Self { rows, cols })
    }
}

impl TryFrom<String> for GridShape {
    type Error = VolumeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridShape> for String {
    fn from(shape: GridShape) -> Self {
        shape.to_string()
    }
}
