//! Traits for mesh types.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Point3;

/// Read access to mesh topology.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces (triangles).
    fn face_count(&self) -> usize;

    /// True if the mesh has no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Vertex by index, `None` if out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Triangle by face index with resolved positions, `None` if the face
    /// or any of its vertices is out of bounds.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all triangles with resolved vertex positions.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Types that can compute a bounding box.
pub trait MeshBounds {
    /// Axis-aligned bounding box; empty if there are no vertices.
    fn bounds(&self) -> Aabb;

    /// Bounding box, or `None` if empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() {
            None
        } else {
            Some(b)
        }
    }

    /// Center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
