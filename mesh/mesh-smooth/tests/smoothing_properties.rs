//! Property tests for Laplacian smoothing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mesh_smooth::{smooth_mesh, SmoothParams};
use mesh_types::{IndexedMesh, MeshBounds, Vertex};
use proptest::prelude::*;

/// A closed triangulated octahedron with jittered vertices.
fn octahedron(jitter: &[f64]) -> IndexedMesh {
    let base = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    let vertices = base
        .iter()
        .zip(jitter)
        .map(|(p, j)| Vertex::from_coords(p[0] * (1.0 + j), p[1] * (1.0 + j), p[2] * (1.0 + j)))
        .collect();
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    IndexedMesh::from_parts(vertices, faces)
}

proptest! {
    #[test]
    fn topology_is_unchanged(
        jitter in proptest::collection::vec(-0.3f64..0.3, 6),
        iterations in 0u32..200,
        relaxation in 0.0f64..=1.0,
        pin in any::<bool>(),
    ) {
        let mut mesh = octahedron(&jitter);
        let faces = mesh.faces.clone();
        let params = SmoothParams::default()
            .with_iterations(iterations)
            .with_relaxation(relaxation)
            .with_preserve_boundaries(pin);

        let report = smooth_mesh(&mut mesh, &params).unwrap();

        prop_assert_eq!(report.iterations, iterations);
        prop_assert_eq!(mesh.vertices.len(), 6);
        prop_assert_eq!(&mesh.faces, &faces);
        prop_assert!(mesh.validate().is_ok());
        prop_assert!(mesh.vertices.iter().all(|v| v.position.coords.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn smoothing_stays_inside_original_bounds(
        jitter in proptest::collection::vec(-0.3f64..0.3, 6),
        relaxation in 0.0f64..=1.0,
    ) {
        let mut mesh = octahedron(&jitter);
        let before = mesh.bounds();
        smooth_mesh(&mut mesh, &SmoothParams::default().with_relaxation(relaxation)).unwrap();

        // Every update is a convex combination of current positions
        let after = mesh.bounds();
        for axis in 0..3 {
            prop_assert!(after.min[axis] >= before.min[axis] - 1e-9);
            prop_assert!(after.max[axis] <= before.max[axis] + 1e-9);
        }
    }
}
