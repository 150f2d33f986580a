//! Fixed isometric orthographic camera.

use mesh_types::{IndexedMesh, MeshBounds, Point3, Vector3};

use crate::error::{RenderError, RenderResult};

/// A projected vertex: pixel coordinates plus depth toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Larger is closer to the camera.
    pub depth: f64,
}

/// Orthographic camera on the `(+1, +1, +1)` diagonal with `+Z` up,
/// framed so the whole mesh fits the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsometricCamera {
    center: Point3<f64>,
    right: Vector3<f64>,
    up: Vector3<f64>,
    toward_viewer: Vector3<f64>,
    scale: f64,
    half_width: f64,
    half_height: f64,
}

impl IsometricCamera {
    /// Frame `mesh` in a `width` x `height` image, letting its projection
    /// span at most `fill` of either dimension.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NonFiniteBounds`] if any vertex coordinate is
    /// not finite.
    pub fn fit(mesh: &IndexedMesh, width: u32, height: u32, fill: f64) -> RenderResult<Self> {
        let bounds = mesh.bounds();
        let center = bounds.center();
        if !center.coords.iter().all(|c| c.is_finite()) {
            return Err(RenderError::NonFiniteBounds);
        }

        let toward_viewer = Vector3::new(1.0, 1.0, 1.0).normalize();
        let world_up = Vector3::z();
        let forward = -toward_viewer;
        let right = forward.cross(&world_up).normalize();
        let up = right.cross(&forward);

        let (mut max_u, mut max_v) = (0.0_f64, 0.0_f64);
        for vertex in &mesh.vertices {
            let d = vertex.position - center;
            max_u = max_u.max(d.dot(&right).abs());
            max_v = max_v.max(d.dot(&up).abs());
        }
        if !(max_u.is_finite() && max_v.is_finite()) {
            return Err(RenderError::NonFiniteBounds);
        }

        let half_width = f64::from(width) / 2.0;
        let half_height = f64::from(height) / 2.0;
        let fit_u = if max_u > 0.0 { half_width * fill / max_u } else { f64::INFINITY };
        let fit_v = if max_v > 0.0 { half_height * fill / max_v } else { f64::INFINITY };
        let scale = fit_u.min(fit_v);
        let scale = if scale.is_finite() { scale } else { 1.0 };

        Ok(Self {
            center,
            right,
            up,
            toward_viewer,
            scale,
            half_width,
            half_height,
        })
    }

    /// Unit vector from the scene toward the camera, also the headlight
    /// direction.
    #[must_use]
    pub fn view_direction(&self) -> Vector3<f64> {
        self.toward_viewer
    }

    /// Pixels per world unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Project to pixel coordinates with `y` growing downward.
    pub(crate) fn project(&self, p: &Point3<f64>) -> ScreenPoint {
        let d = p - self.center;
        ScreenPoint {
            x: self.half_width + d.dot(&self.right) * self.scale,
            y: self.half_height - d.dot(&self.up) * self.scale,
            depth: d.dot(&self.toward_viewer),
        }
    }
}
