//! Laplacian smoothing for marching-cubes surfaces.
//!
//! Marching cubes on a binary field produces a terraced surface. A fixed
//! number of small relaxation steps removes the staircase without changing
//! the mesh connectivity:
//!
//! ```text
//! p <- p + relaxation * (mean(neighbours) - p)
//! ```
//!
//! All vertices move simultaneously in each pass. Vertex count, face count
//! and face indices are never modified.
//!
//! # Example
//!
//! ```
//! use mesh_smooth::{smooth_mesh, SmoothParams};
//! use mesh_types::unit_cube;
//!
//! let mut mesh = unit_cube();
//! let report = smooth_mesh(&mut mesh, &SmoothParams::default()).unwrap();
//!
//! assert_eq!(report.iterations, 100);
//! assert_eq!(mesh.vertices.len(), 8);
//! assert!(mesh.has_normals());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod error;
mod laplacian;
mod params;
mod result;

pub use adjacency::VertexAdjacency;
pub use error::{SmoothError, SmoothResult};
pub use laplacian::{smooth_mesh, smooth_step};
pub use params::SmoothParams;
pub use result::SmoothReport;
