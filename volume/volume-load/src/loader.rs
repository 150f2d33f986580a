//! Directory-level series loading.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use volume_types::SliceRecord;

use crate::error::{LoadError, LoadResult};
use crate::order::{order_slices, SliceOrdering};
use crate::source::SliceSource;

/// A file that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// The skipped file.
    pub path: PathBuf,
    /// Why it could not be read.
    pub reason: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// An ordered series plus the files that were skipped.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    /// Parsed records in stacking order. Never empty.
    pub records: Vec<SliceRecord>,
    /// One entry per skipped file.
    pub warnings: Vec<LoadWarning>,
    /// The key the records were sorted by.
    pub ordering: SliceOrdering,
}

/// Loads every parseable slice file in a directory.
#[derive(Debug, Clone, Default)]
pub struct SeriesLoader<S> {
    source: S,
}

impl<S: SliceSource> SeriesLoader<S> {
    /// Create a loader around a slice source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying slice source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Parse and order all regular files directly inside `dir`.
    ///
    /// Subdirectories are not descended into.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::ReadDir`] if the directory cannot be listed and
    /// [`LoadError::NoValidSlices`] if no file parses.
    pub fn load(&self, dir: &Path) -> LoadResult<LoadedSeries> {
        let files = discover(dir)?;
        info!(dir = %dir.display(), files = files.len(), "Scanning slice directory");

        let mut records = Vec::with_capacity(files.len());
        let mut warnings = Vec::new();
        for (arrival, path) in files.into_iter().enumerate() {
            match self.source.read_slice(&path) {
                Ok(mut record) => {
                    record.arrival = arrival;
                    record.source = path;
                    records.push(record);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable slice file");
                    warnings.push(LoadWarning {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if records.is_empty() {
            return Err(LoadError::NoValidSlices {
                dir: dir.to_path_buf(),
                skipped: warnings.len(),
            });
        }

        let ordering = order_slices(&mut records);
        info!(
            slices = records.len(),
            skipped = warnings.len(),
            %ordering,
            "Loaded slice series"
        );
        Ok(LoadedSeries {
            records,
            warnings,
            ordering,
        })
    }
}

/// Regular files in `dir`, sorted by file name.
fn discover(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    let read_err = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Ignoring non-file entry");
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{SliceReadError, SliceReadResult};
    use std::fs;
    use tempfile::tempdir;
    use volume_types::{GridShape, SliceGrid};

    /// Parses files whose content is `slice <location>`.
    fn text_source(path: &Path) -> SliceReadResult<SliceRecord> {
        let text = fs::read_to_string(path)?;
        let loc = text
            .strip_prefix("slice ")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_else(|| SliceReadError::unsupported("not a text slice"))?;
        Ok(SliceRecord::new(SliceGrid::filled(GridShape::new(2, 2), 0.0), 0).with_slice_location(loc))
    }

    #[test]
    fn skips_unreadable_and_orders() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "slice 3").unwrap();
        fs::write(dir.path().join("b.txt"), "garbage").unwrap();
        fs::write(dir.path().join("c.txt"), "slice 1").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let series = SeriesLoader::new(text_source).load(dir.path()).unwrap();
        assert_eq!(series.records.len(), 2);
        assert_eq!(series.ordering, SliceOrdering::SliceLocation);
        assert_eq!(series.records[0].slice_location, Some(1.0));
        assert_eq!(series.records[0].arrival, 2);
        assert!(series.records[0].source.ends_with("c.txt"));

        assert_eq!(series.warnings.len(), 1);
        assert!(series.warnings[0].path.ends_with("b.txt"));
    }

    #[test]
    fn all_unreadable_is_no_valid_slices() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x"), "nope").unwrap();
        fs::write(dir.path().join("y"), "nope").unwrap();

        let err = SeriesLoader::new(text_source).load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoValidSlices { skipped: 2, .. }));
    }

    #[test]
    fn empty_directory_is_no_valid_slices() {
        let dir = tempdir().unwrap();
        let err = SeriesLoader::new(text_source).load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoValidSlices { skipped: 0, .. }));
    }

    #[test]
    fn missing_directory_is_read_error() {
        let dir = tempdir().unwrap();
        let err = SeriesLoader::new(text_source)
            .load(&dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, LoadError::ReadDir { .. }));
    }

    #[test]
    fn arrival_is_file_name_order() {
        let dir = tempdir().unwrap();
        for name in ["03", "01", "02"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let source = |_: &Path| -> SliceReadResult<SliceRecord> {
            Ok(SliceRecord::new(SliceGrid::filled(GridShape::new(1, 1), 0.0), 99))
        };
        let series = SeriesLoader::new(source).load(dir.path()).unwrap();
        assert_eq!(series.ordering, SliceOrdering::Arrival);
        let names: Vec<_> = series
            .records
            .iter()
            .map(|r| r.source.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["01", "02", "03"]);
    }
}
