//! Mesh file export and import.
//!
//! Reconstructed surfaces are written as STL, either binary (the default)
//! or ASCII. Files are written through a temporary file in the destination
//! directory and persisted with a rename, so a failed export never leaves a
//! partial file at the requested path.
//!
//! The reader auto-detects the encoding and welds vertices that share
//! bit-identical coordinates, so an exported mesh re-reads with the same
//! vertex and face counts as long as no two of its vertices coincide.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_stl, save_stl, StlEncoding};
//! use mesh_types::unit_cube;
//!
//! save_stl(&unit_cube(), "cube.stl", StlEncoding::Binary).unwrap();
//! let cube = load_stl("cube.stl").unwrap();
//! assert_eq!(cube.faces.len(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod atomic;
mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{load_stl, read_stl, save_stl, write_stl, StlEncoding};
