//! Marching cubes over a binary field.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Vertex};
use tracing::debug;
use volume_types::{BinaryField, VolumeDims, VoxelSpacing};

use crate::engine::SurfaceExtractionEngine;
use crate::error::{SurfaceError, SurfaceResult};
use crate::tables::{CORNERS, EDGES, EDGE_TABLE, TRI_TABLE};

/// Classic 256-case marching cubes at iso level 0.5.
///
/// Each cell spans eight neighbouring voxels. Vertices sit at the
/// midpoints of cell edges whose end voxels differ, and a vertex is shared
/// by every cell touching its edge, so a surface enclosed by the grid is
/// closed and manifold. The field is not padded: selected voxels on the
/// grid border leave the surface open there.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarchingCubesEngine;

impl MarchingCubesEngine {
    /// Create the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SurfaceExtractionEngine for MarchingCubesEngine {
    fn name(&self) -> &'static str {
        "marching-cubes"
    }

    fn extract(&self, field: &BinaryField, spacing: VoxelSpacing) -> SurfaceResult<IndexedMesh> {
        let dims = field.dims();
        let mut builder = SurfaceBuilder::new(dims, spacing);

        for s in 0..dims.depth.saturating_sub(1) {
            for r in 0..dims.rows.saturating_sub(1) {
                for c in 0..dims.cols.saturating_sub(1) {
                    builder.march_cell(field, s, r, c)?;
                }
            }
        }

        let mut mesh = builder.mesh;
        mesh.compute_vertex_normals();
        debug!(
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "Marched cells"
        );
        Ok(mesh)
    }
}

/// Lattice point as `(slice, row, col)`.
type LatticePoint = (usize, usize, usize);

struct SurfaceBuilder {
    dims: VolumeDims,
    spacing: VoxelSpacing,
    /// Edge between two lattice points (flat indices, ascending) to vertex.
    edge_vertices: HashMap<(usize, usize), u32>,
    mesh: IndexedMesh,
}

impl SurfaceBuilder {
    fn new(dims: VolumeDims, spacing: VoxelSpacing) -> Self {
        Self {
            dims,
            spacing,
            edge_vertices: HashMap::new(),
            mesh: IndexedMesh::new(),
        }
    }

    fn march_cell(&mut self, field: &BinaryField, s: usize, r: usize, c: usize) -> SurfaceResult<()> {
        let corners = CORNERS.map(|[x, y, z]| (s + z, r + y, c + x));

        let mut case = 0usize;
        for (bit, &(cs, cr, cc)) in corners.iter().enumerate() {
            if !field.get(cs, cr, cc) {
                case |= 1 << bit;
            }
        }
        if EDGE_TABLE[case] == 0 {
            return Ok(());
        }

        for tri in TRI_TABLE[case].chunks_exact(3) {
            if tri[0] < 0 {
                break;
            }
            let mut face = [0u32; 3];
            for (slot, &edge) in face.iter_mut().zip(tri) {
                #[allow(clippy::cast_sign_loss)]
                // Sign: the -1 terminator was handled above
                let [a, b] = EDGES[edge as usize];
                *slot = self.edge_vertex(corners[a], corners[b])?;
            }
            self.mesh.faces.push(face);
        }
        Ok(())
    }

    fn edge_vertex(&mut self, a: LatticePoint, b: LatticePoint) -> SurfaceResult<u32> {
        let ia = self.dims.index(a.0, a.1, a.2);
        let ib = self.dims.index(b.0, b.1, b.2);
        let key = if ia < ib { (ia, ib) } else { (ib, ia) };

        if let Some(&index) = self.edge_vertices.get(&key) {
            return Ok(index);
        }

        let count = self.mesh.vertices.len();
        let index = u32::try_from(count).map_err(|_| SurfaceError::TooManyVertices { count })?;
        let pa = self.position(a);
        let pb = self.position(b);
        self.mesh
            .vertices
            .push(Vertex::new(Point3::from((pa.coords + pb.coords) * 0.5)));
        self.edge_vertices.insert(key, index);
        Ok(index)
    }

    #[allow(clippy::cast_precision_loss)]
    // Precision: lattice indices are far below 2^52
    fn position(&self, (s, r, c): LatticePoint) -> Point3<f64> {
        Point3::new(
            c as f64 * self.spacing.col,
            r as f64 * self.spacing.row,
            s as f64 * self.spacing.slice,
        )
    }
}
