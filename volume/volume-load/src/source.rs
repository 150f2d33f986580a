//! The single-file parsing seam.

use std::path::Path;

use volume_types::SliceRecord;

use crate::error::SliceReadResult;

/// Parses one file into a [`SliceRecord`].
///
/// Implementations fill the grid and whatever metadata the file carries.
/// The loader overwrites `arrival` and `source`, so implementations may
/// leave them at their defaults.
///
/// Any `Fn(&Path) -> SliceReadResult<SliceRecord>` is a source, which
/// keeps fakes in tests short:
///
/// ```
/// use std::path::Path;
/// use volume_load::{SliceReadResult, SliceSource};
/// use volume_types::{GridShape, SliceGrid, SliceRecord};
///
/// let fake = |_: &Path| -> SliceReadResult<SliceRecord> {
///     Ok(SliceRecord::new(SliceGrid::filled(GridShape::new(2, 2), 1.0), 0))
/// };
/// assert!(fake.read_slice(Path::new("any")).is_ok());
/// ```
pub trait SliceSource {
    /// Parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not a usable slice.
    fn read_slice(&self, path: &Path) -> SliceReadResult<SliceRecord>;
}

impl<F> SliceSource for F
where
    F: Fn(&Path) -> SliceReadResult<SliceRecord>,
{
    fn read_slice(&self, path: &Path) -> SliceReadResult<SliceRecord> {
        self(path)
    }
}
