//! Surface extraction from binary volumes.
//!
//! A [`SurfaceExtractionEngine`] turns a [`BinaryField`] and its voxel
//! spacing into a triangle mesh in physical units. The default engine is
//! [`MarchingCubesEngine`], which places vertices on edge midpoints (iso
//! level 0.5 of a 0/1 field) and shares them between neighbouring cells.
//!
//! [`extract_surface`] wraps an engine with optional decimation and the
//! empty-surface check.
//!
//! # Example
//!
//! ```
//! use volume_surface::{extract_surface, MarchingCubesEngine};
//! use volume_types::{BinaryField, VolumeDims, VoxelSpacing};
//!
//! // A single-voxel blob inside a 3x3x3 grid
//! let field = BinaryField::from_fn(VolumeDims::new(3, 3, 3), |s, r, c| (s, r, c) == (1, 1, 1));
//! let mesh = extract_surface(&MarchingCubesEngine::new(), &field, VoxelSpacing::UNIT, 1).unwrap();
//!
//! assert_eq!(mesh.vertices.len(), 6);
//! assert_eq!(mesh.faces.len(), 8);
//! assert!(mesh.signed_volume() > 0.0);
//! ```
//!
//! [`BinaryField`]: volume_types::BinaryField

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod engine;
mod error;
mod extract;
mod marching_cubes;
mod tables;

pub use engine::SurfaceExtractionEngine;
pub use error::{SurfaceError, SurfaceResult};
pub use extract::extract_surface;
pub use marching_cubes::MarchingCubesEngine;
