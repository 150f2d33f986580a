//! Preview rendering for triangle meshes.
//!
//! Produces a single static image of a mesh without a GPU or windowing
//! system: an orthographic camera looks at the mesh from the `(+1, +1, +1)`
//! direction with `+Z` up, triangles are rasterized into a depth buffer,
//! and vertex intensities from a headlight are interpolated across each
//! face (Gouraud shading).
//!
//! # Example
//!
//! ```
//! use mesh_render::{render_preview, PreviewParams};
//! use mesh_types::unit_cube;
//!
//! let params = PreviewParams::default().with_size(160, 120);
//! let image = render_preview(&unit_cube(), &params).unwrap();
//!
//! assert_eq!(image.dimensions(), (160, 120));
//! assert_ne!(image.get_pixel(80, 60), image.get_pixel(0, 0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod camera;
mod error;
mod params;
mod raster;
mod render;

pub use camera::IsometricCamera;
pub use error::{RenderError, RenderResult};
pub use params::PreviewParams;
pub use render::{render_preview, save_preview};
