//! Core mesh types for reconstructed tissue surfaces.
//!
//! This crate provides the data model shared by surface extraction,
//! smoothing, export and preview rendering:
//!
//! - [`Vertex`] - A point in 3D space with an optional normal
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! Coordinates are physical units (millimeters for typical scanner
//! metadata), with voxel spacing already applied.
//!
//! # Coordinate System
//!
//! Meshes extracted from a volume use:
//! - X: column axis of a slice
//! - Y: row axis of a slice
//! - Z: slice (stacking) axis
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod error;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use mesh::{unit_cube, IndexedMesh};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
