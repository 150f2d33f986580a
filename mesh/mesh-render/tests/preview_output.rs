//! Preview file output tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mesh_render::{save_preview, PreviewParams, RenderError};
use mesh_types::{unit_cube, IndexedMesh};
use tempfile::tempdir;

#[test]
fn writes_a_readable_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preview.png");

    save_preview(&unit_cube(), &path, &PreviewParams::default()).unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (800, 600));
}

#[test]
fn overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preview.png");
    std::fs::write(&path, b"stale").unwrap();

    save_preview(&unit_cube(), &path, &PreviewParams::thumbnail()).unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (200, 150));
}

#[test]
fn failure_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preview.png");

    let err = save_preview(&IndexedMesh::new(), &path, &PreviewParams::default()).unwrap_err();
    assert!(matches!(err, RenderError::EmptyMesh));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent").join("preview.png");

    let err = save_preview(&unit_cube(), &path, &PreviewParams::thumbnail()).unwrap_err();
    assert!(matches!(err, RenderError::Io(_)));
    assert!(!path.exists());
}
