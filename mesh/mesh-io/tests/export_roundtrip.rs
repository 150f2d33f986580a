//! File-level export tests: round trips and failure cleanliness.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mesh_io::{load_stl, save_stl, IoError, StlEncoding};
use mesh_types::{unit_cube, IndexedMesh, MeshTopology, Vertex};
use tempfile::tempdir;

/// A closed octahedron with outward winding.
fn octahedron() -> IndexedMesh {
    let vertices = vec![
        Vertex::from_coords(1.0, 0.0, 0.0),
        Vertex::from_coords(-1.0, 0.0, 0.0),
        Vertex::from_coords(0.0, 1.0, 0.0),
        Vertex::from_coords(0.0, -1.0, 0.0),
        Vertex::from_coords(0.0, 0.0, 1.0),
        Vertex::from_coords(0.0, 0.0, -1.0),
    ];
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

#[test]
fn binary_round_trip_preserves_counts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("octa.stl");
    let mesh = octahedron();

    save_stl(&mesh, &path, StlEncoding::Binary).unwrap();
    let loaded = load_stl(&path).unwrap();

    assert_eq!(loaded.vertex_count(), mesh.vertex_count());
    assert_eq!(loaded.face_count(), mesh.face_count());
    assert!(loaded.signed_volume() > 0.0);
}

#[test]
fn ascii_round_trip_preserves_counts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cube_ascii.stl");
    let mesh = unit_cube();

    save_stl(&mesh, &path, StlEncoding::Ascii).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid"));

    let loaded = load_stl(&path).unwrap();
    assert_eq!(loaded.vertex_count(), 8);
    assert_eq!(loaded.face_count(), 12);
}

#[test]
fn overwrite_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mesh.stl");
    std::fs::write(&path, b"stale").unwrap();

    save_stl(&unit_cube(), &path, StlEncoding::Binary).unwrap();
    assert_eq!(load_stl(&path).unwrap().face_count(), 12);
}

#[test]
fn missing_directory_fails_without_residue() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent").join("mesh.stl");

    let err = save_stl(&unit_cube(), &path, StlEncoding::Binary).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
    assert!(!path.exists());
}

#[test]
fn invalid_mesh_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.stl");
    let mut mesh = unit_cube();
    mesh.faces.push([0, 1, 42]);

    assert!(save_stl(&mesh, &path, StlEncoding::Binary).is_err());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn load_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_stl(dir.path().join("nope.stl")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
