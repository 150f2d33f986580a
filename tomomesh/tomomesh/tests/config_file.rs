//! Loading configuration from disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use tempfile::tempdir;
use tomomesh::prelude::*;

#[test]
fn file_values_override_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tomomesh.toml");
    fs::write(
        &path,
        r#"
min_threshold = 200
max_threshold = "none"
filter_type = "median"
target_shape = "256x256"
smoothing_iterations = 20
preview_width = 320
preview_height = 240
ascii_stl = true
"#,
    )
    .unwrap();

    let config = PipelineConfig::load(&path).unwrap();
    assert_eq!(config.min_threshold, 200);
    assert_eq!(config.max_threshold, None);
    assert_eq!(config.filter, FilterKind::Median);
    assert_eq!(config.target_shape, Some(GridShape::new(256, 256)));
    assert_eq!(config.smoothing.iterations, 20);
    assert_eq!((config.preview.width, config.preview.height), (320, 240));
    assert_eq!(config.stl_encoding, StlEncoding::Ascii);
    assert_eq!(config.step_size, 1);
}

#[test]
fn missing_file_is_config_error() {
    let dir = tempdir().unwrap();
    let err = PipelineConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PipelineError::ConfigFile { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn unknown_key_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "min_treshold = 100\n").unwrap();
    let err = PipelineConfig::load(&path).unwrap_err();
    assert!(matches!(err, PipelineError::ConfigParse(_)));
}

#[test]
fn invalid_values_fail_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inverted.toml");
    fs::write(&path, "min_threshold = 900\nmax_threshold = 100\n").unwrap();
    let err = PipelineConfig::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert!(err.to_string().contains("max_threshold"));
}
