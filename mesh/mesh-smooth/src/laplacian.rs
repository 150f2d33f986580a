//! Uniform-weight Laplacian relaxation.

use mesh_types::{IndexedMesh, Point3, Vector3};
use tracing::{debug, info};

use crate::adjacency::VertexAdjacency;
use crate::error::SmoothResult;
use crate::params::SmoothParams;
use crate::result::SmoothReport;

/// Smooth `mesh` in place and recompute its vertex normals.
///
/// Isolated vertices do not move, and neither do boundary vertices when
/// `params.preserve_boundaries` is set. Zero iterations leave positions
/// unchanged but still refresh normals.
///
/// # Errors
///
/// Returns an error if `params` fail validation or a face index is out of
/// bounds.
pub fn smooth_mesh(mesh: &mut IndexedMesh, params: &SmoothParams) -> SmoothResult<SmoothReport> {
    params.validate()?;
    mesh.validate()?;

    let adjacency = VertexAdjacency::build(mesh);
    let pinned_vertices = if params.preserve_boundaries {
        adjacency.boundary_count()
    } else {
        0
    };

    let mut scratch = Vec::with_capacity(mesh.vertices.len());
    let mut max_displacement = 0.0_f64;
    for pass in 0..params.iterations {
        let moved = smooth_step(mesh, &adjacency, params, &mut scratch);
        max_displacement = max_displacement.max(moved);
        debug!(pass, max_displacement = moved, "Smoothing pass");
    }

    mesh.compute_vertex_normals();

    let report = SmoothReport {
        iterations: params.iterations,
        max_displacement,
        pinned_vertices,
    };
    info!(
        iterations = report.iterations,
        relaxation = params.relaxation,
        max_displacement = report.max_displacement,
        pinned = report.pinned_vertices,
        "Smoothed mesh"
    );
    Ok(report)
}

/// Run one relaxation pass and return the largest displacement.
///
/// New positions are computed from the old ones for every vertex before
/// any vertex moves. `scratch` is reused between passes.
pub fn smooth_step(
    mesh: &mut IndexedMesh,
    adjacency: &VertexAdjacency,
    params: &SmoothParams,
    scratch: &mut Vec<Point3<f64>>,
) -> f64 {
    scratch.clear();
    scratch.extend(mesh.vertices.iter().map(|v| v.position));

    let mut max_displacement = 0.0_f64;
    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        if params.preserve_boundaries && adjacency.is_boundary(i) {
            continue;
        }
        let ring = adjacency.neighbors(i);
        if ring.is_empty() {
            continue;
        }

        let sum = ring
            .iter()
            .fold(Vector3::zeros(), |acc, &n| acc + scratch[n as usize].coords);
        #[allow(clippy::cast_precision_loss)]
        let centroid = sum / ring.len() as f64;

        let displacement = (centroid - scratch[i].coords) * params.relaxation;
        max_displacement = max_displacement.max(displacement.norm());
        vertex.position = scratch[i] + displacement;
    }
    max_displacement
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{unit_cube, MeshBounds, Vertex};
    use rand::{Rng, SeedableRng};

    fn make_plane_mesh(n: u32) -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for i in 0..n {
            for j in 0..n {
                mesh.vertices
                    .push(Vertex::from_coords(f64::from(i), f64::from(j), 0.0));
            }
        }
        for i in 0..n - 1 {
            for j in 0..n - 1 {
                let idx = i * n + j;
                mesh.faces.push([idx, idx + 1, idx + n]);
                mesh.faces.push([idx + 1, idx + n + 1, idx + n]);
            }
        }
        mesh
    }

    fn make_noisy_plane_mesh(n: u32, noise: f64) -> IndexedMesh {
        let mut mesh = make_plane_mesh(n);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for vertex in &mut mesh.vertices {
            vertex.position.z += rng.gen_range(-noise..noise);
        }
        mesh
    }

    fn z_spread(mesh: &IndexedMesh) -> f64 {
        let b = mesh.bounds();
        b.max.z - b.min.z
    }

    #[test]
    fn noise_is_reduced() {
        let mut mesh = make_noisy_plane_mesh(12, 0.2);
        let before = z_spread(&mesh);
        let params = SmoothParams::default().with_relaxation(0.5).with_iterations(20);
        let report = smooth_mesh(&mut mesh, &params).unwrap();

        assert!(report.moved());
        assert!(z_spread(&mesh) < before * 0.5);
    }

    #[test]
    fn preserves_counts_and_faces() {
        let mut mesh = make_noisy_plane_mesh(6, 0.1);
        let faces = mesh.faces.clone();
        smooth_mesh(&mut mesh, &SmoothParams::default()).unwrap();

        assert_eq!(mesh.vertices.len(), 36);
        assert_eq!(mesh.faces, faces);
        assert!(mesh.has_normals());
    }

    #[test]
    fn boundary_vertices_stay_when_pinned() {
        let mut mesh = make_noisy_plane_mesh(6, 0.1);
        let before = mesh.vertices.clone();
        let params = SmoothParams::default()
            .with_relaxation(0.5)
            .with_preserve_boundaries(true);
        let report = smooth_mesh(&mut mesh, &params).unwrap();

        // Perimeter of a 6x6 grid
        assert_eq!(report.pinned_vertices, 20);
        for (i, (old, new)) in before.iter().zip(&mesh.vertices).enumerate() {
            let (row, col) = (i / 6, i % 6);
            if row == 0 || row == 5 || col == 0 || col == 5 {
                assert_eq!(old.position, new.position);
            }
        }
    }

    #[test]
    fn zero_iterations_only_refreshes_normals() {
        let mut mesh = unit_cube();
        let before: Vec<_> = mesh.vertices.iter().map(|v| v.position).collect();
        let report = smooth_mesh(&mut mesh, &SmoothParams::disabled()).unwrap();

        assert_eq!(report.iterations, 0);
        assert!(!report.moved());
        let after: Vec<_> = mesh.vertices.iter().map(|v| v.position).collect();
        assert_eq!(before, after);
        assert!(mesh.has_normals());
    }

    #[test]
    fn small_relaxation_moves_little() {
        let mut mesh = unit_cube();
        let report = smooth_mesh(&mut mesh, &SmoothParams::default()).unwrap();
        // 100 passes at 0.01 shrink the cube noticeably but keep it centred
        assert!(report.max_displacement < 0.05);
        let centre = mesh.bounds().center();
        assert_relative_eq!(centre.x, 0.5, epsilon = 0.05);
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn invalid_mesh_is_rejected() {
        let mut mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![[0, 1, 2]]);
        assert!(smooth_mesh(&mut mesh, &SmoothParams::default()).is_err());
    }
}
