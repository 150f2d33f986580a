//! Vertex neighbourhoods.

use hashbrown::HashMap;
use mesh_types::IndexedMesh;

/// One-ring neighbours of every vertex plus boundary flags, built once
/// per mesh.
///
/// Neighbours are stored contiguously: vertex `v` owns
/// `neighbors[offsets[v]..offsets[v + 1]]`, sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAdjacency {
    offsets: Vec<usize>,
    neighbors: Vec<u32>,
    boundary: Vec<bool>,
}

impl VertexAdjacency {
    /// Build adjacency for `mesh`. Faces must already be validated.
    #[must_use]
    pub fn build(mesh: &IndexedMesh) -> Self {
        let n = mesh.vertices.len();
        let mut rings: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut edge_use: HashMap<(u32, u32), u32> = HashMap::with_capacity(mesh.faces.len() * 3 / 2);

        for face in &mesh.faces {
            for i in 0..3 {
                let a = face[i];
                let b = face[(i + 1) % 3];
                rings[a as usize].push(b);
                rings[b as usize].push(a);
                let key = if a < b { (a, b) } else { (b, a) };
                *edge_use.entry(key).or_insert(0) += 1;
            }
        }

        let mut boundary = vec![false; n];
        for ((a, b), uses) in edge_use {
            if uses == 1 {
                boundary[a as usize] = true;
                boundary[b as usize] = true;
            }
        }

        let mut offsets = Vec::with_capacity(n + 1);
        let mut neighbors = Vec::new();
        offsets.push(0);
        for mut ring in rings {
            ring.sort_unstable();
            ring.dedup();
            neighbors.extend(ring);
            offsets.push(neighbors.len());
        }

        Self {
            offsets,
            neighbors,
            boundary,
        }
    }

    /// Number of vertices covered.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.boundary.len()
    }

    /// Neighbours of vertex `v`.
    #[must_use]
    pub fn neighbors(&self, v: usize) -> &[u32] {
        &self.neighbors[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Whether `v` lies on an edge used by exactly one face.
    #[must_use]
    pub fn is_boundary(&self, v: usize) -> bool {
        self.boundary[v]
    }

    /// Number of boundary vertices.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundary.iter().filter(|&&b| b).count()
    }
}
