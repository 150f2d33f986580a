//! Preview rendering and PNG output.

use std::borrow::Cow;
use std::io::{Cursor, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use mesh_types::IndexedMesh;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::camera::IsometricCamera;
use crate::error::{RenderError, RenderResult};
use crate::params::PreviewParams;
use crate::raster::Framebuffer;

/// Render `mesh` from the isometric viewpoint.
///
/// Vertex normals are used for shading; a mesh without them gets
/// area-weighted normals computed on a copy. Shading is two-sided, so
/// faces seen from behind are lit like front faces.
///
/// # Errors
///
/// - [`RenderError::InvalidSize`] for a zero width or height
/// - [`RenderError::EmptyMesh`] if the mesh has no faces
/// - [`RenderError::InvalidMesh`] if a face index is out of bounds
/// - [`RenderError::NonFiniteBounds`] for non-finite coordinates
pub fn render_preview(mesh: &IndexedMesh, params: &PreviewParams) -> RenderResult<RgbImage> {
    if params.width == 0 || params.height == 0 {
        return Err(RenderError::InvalidSize {
            width: params.width,
            height: params.height,
        });
    }
    if mesh.faces.is_empty() {
        return Err(RenderError::EmptyMesh);
    }
    mesh.validate()?;

    let mesh = if mesh.has_normals() {
        Cow::Borrowed(mesh)
    } else {
        let mut owned = mesh.clone();
        owned.compute_vertex_normals();
        Cow::Owned(owned)
    };

    let camera = IsometricCamera::fit(&mesh, params.width, params.height, params.fill)?;
    let light = camera.view_direction();
    let ambient = params.ambient.clamp(0.0, 1.0);

    let screen: Vec<_> = mesh.vertices.iter().map(|v| camera.project(&v.position)).collect();
    let intensity: Vec<f64> = mesh
        .vertices
        .iter()
        .map(|v| {
            let diffuse = v.normal.map_or(0.0, |n| n.dot(&light).abs());
            ambient + (1.0 - ambient) * diffuse
        })
        .collect();

    let mut framebuffer = Framebuffer::new(params.width, params.height, params.background);
    for face in &mesh.faces {
        let [a, b, c] = face.map(|i| i as usize);
        framebuffer.draw_triangle(
            [screen[a], screen[b], screen[c]],
            [intensity[a], intensity[b], intensity[c]],
            params.surface,
        );
    }

    debug!(
        width = params.width,
        height = params.height,
        faces = mesh.faces.len(),
        scale = camera.scale(),
        "Rasterized preview"
    );
    Ok(framebuffer.image)
}

/// Render `mesh` and write it to `path` as PNG.
///
/// The image is written to a temporary file in the destination directory
/// and moved into place, so a failure never leaves a partial file.
///
/// # Errors
///
/// Returns any rendering error, [`RenderError::Image`] if encoding fails,
/// and [`RenderError::Io`] if the file cannot be written.
pub fn save_preview(mesh: &IndexedMesh, path: &Path, params: &PreviewParams) -> RenderResult<()> {
    let image = render_preview(mesh, params)?;

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&png)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = png.len(), "Saved preview");
    Ok(())
}
