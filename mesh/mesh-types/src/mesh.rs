//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshError, MeshResult, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing
/// vertices by index. Faces use counter-clockwise winding seen from
/// outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let vertices = vec![
///     Vertex::from_coords(0.0, 0.0, 0.0),
///     Vertex::from_coords(1.0, 0.0, 0.0),
///     Vertex::from_coords(0.0, 1.0, 0.0),
/// ];
/// let mesh = IndexedMesh::from_parts(vertices, vec![[0, 1, 2]]);
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create an empty mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Check that every face index is in bounds and every coordinate is
    /// finite.
    ///
    /// # Errors
    ///
    /// Returns the first defect found.
    pub fn validate(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfBounds {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        if let Some(index) = self
            .vertices
            .iter()
            .position(|v| !v.position.coords.iter().all(|c| c.is_finite()))
        {
            return Err(MeshError::NonFiniteVertex { index });
        }
        Ok(())
    }

    /// Recompute per-vertex normals as the normalized sum of adjacent
    /// face normals weighted by face area.
    ///
    /// Vertices with no non-degenerate adjacent face keep no normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.faces {
            let Some(t) = self.resolve(tri) else {
                continue;
            };
            let n = t.scaled_normal();
            for &i in tri {
                sums[i as usize] += n;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            let len = sum.norm();
            vertex.normal = (len > f64::EPSILON).then(|| sum / len);
        }
    }

    /// True if every vertex carries a normal.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        self.vertices.iter().all(|v| v.normal.is_some())
    }

    /// Signed volume enclosed by the surface (divergence theorem).
    ///
    /// Positive for a closed mesh with outward winding.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles()
            .map(|t| t.v0.coords.dot(&t.v1.coords.cross(&t.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Reverse winding of every face and negate vertex normals.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
        for vertex in &mut self.vertices {
            if let Some(normal) = vertex.normal.as_mut() {
                *normal = -*normal;
            }
        }
    }

    fn resolve(&self, &[i0, i1, i2]: &[u32; 3]) -> Option<Triangle> {
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.faces.get(face_index).and_then(|f| self.resolve(f))
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().filter_map(|f| self.resolve(f))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// A cube from (0,0,0) to (1,1,1) with outward winding.
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let vertices = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ]
    .into_iter()
    .map(Vertex::from)
    .collect();

    let faces = vec![
        [0, 2, 1],
        [0, 3, 2], // z = 0
        [4, 5, 6],
        [4, 6, 7], // z = 1
        [0, 1, 5],
        [0, 5, 4], // y = 0
        [3, 7, 6],
        [3, 6, 2], // y = 1
        [0, 4, 7],
        [0, 7, 3], // x = 0
        [1, 2, 6],
        [1, 6, 5], // x = 1
    ];

    IndexedMesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_mesh() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_empty());
        assert!(mesh.bounds_opt().is_none());
    }

    #[test]
    fn unit_cube_measures() {
        let cube = unit_cube();
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-12);
        assert!(cube.validate().is_ok());
    }

    #[test]
    fn flipped_cube_has_negative_volume() {
        let mut cube = unit_cube();
        cube.flip_normals();
        assert!(cube.signed_volume() < 0.0);
    }

    #[test]
    fn validate_rejects_out_of_range_index() {
        let mut cube = unit_cube();
        cube.faces.push([0, 1, 8]);
        assert_eq!(
            cube.validate(),
            Err(MeshError::IndexOutOfBounds {
                face: 12,
                index: 8,
                vertex_count: 8,
            })
        );
    }

    #[test]
    fn validate_rejects_nan() {
        let mut cube = unit_cube();
        cube.vertices[3].position.y = f64::NAN;
        assert_eq!(cube.validate(), Err(MeshError::NonFiniteVertex { index: 3 }));
    }

    #[test]
    fn cube_vertex_normals_point_outward() {
        let mut cube = unit_cube();
        cube.compute_vertex_normals();
        assert!(cube.has_normals());

        let center = cube.center();
        for v in &cube.vertices {
            let n = v.normal.unwrap_or_else(Vector3::zeros);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert!(n.dot(&(v.position - center)) > 0.0);
        }
    }

    #[test]
    fn triangle_lookup_out_of_bounds() {
        let cube = unit_cube();
        assert!(cube.triangle(11).is_some());
        assert!(cube.triangle(12).is_none());
    }
}
