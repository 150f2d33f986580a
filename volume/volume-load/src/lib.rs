//! Slice series loading.
//!
//! [`SeriesLoader`] turns a directory of slice files into an ordered list
//! of [`SliceRecord`](volume_types::SliceRecord)s. Parsing a single file is
//! delegated to a [`SliceSource`]; the default is [`DicomSliceSource`].
//!
//! Files that fail to parse are skipped and reported as [`LoadWarning`]s.
//! Loading fails only when no file parses.
//!
//! # Ordering
//!
//! | Records carrying the key          | Sort key            |
//! |-----------------------------------|---------------------|
//! | any record has a slice location   | slice location      |
//! | else any has an instance number   | instance number     |
//! | otherwise                         | discovery order     |
//!
//! Records missing the chosen key sort last. Ties keep discovery order,
//! and discovery order is file-name order.
//!
//! # Example
//!
//! ```no_run
//! use volume_load::{DicomSliceSource, SeriesLoader};
//!
//! let series = SeriesLoader::new(DicomSliceSource::new()).load("scans/ct".as_ref()).unwrap();
//! println!("{} slices ordered by {}", series.records.len(), series.ordering);
//! for warning in &series.warnings {
//!     eprintln!("skipped {warning}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod dicom;
mod error;
mod loader;
mod order;
mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod synth;

pub use dicom::DicomSliceSource;
pub use error::{LoadError, LoadResult, SliceReadError, SliceReadResult};
pub use loader::{LoadWarning, LoadedSeries, SeriesLoader};
pub use order::{order_slices, SliceOrdering};
pub use source::SliceSource;
