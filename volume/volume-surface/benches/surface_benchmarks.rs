//! Benchmarks for marching cubes extraction.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use volume_surface::{extract_surface, MarchingCubesEngine};
use volume_types::{BinaryField, VolumeDims, VoxelSpacing};

fn sphere(n: usize) -> BinaryField {
    let centre = (n as f64 - 1.0) / 2.0;
    let radius = n as f64 * 0.35;
    BinaryField::from_fn(VolumeDims::new(n, n, n), |s, r, c| {
        let d2 = (s as f64 - centre).powi(2) + (r as f64 - centre).powi(2) + (c as f64 - centre).powi(2);
        d2 <= radius * radius
    })
}

fn bench_marching_cubes(c: &mut Criterion) {
    let engine = MarchingCubesEngine::new();
    let mut group = c.benchmark_group("marching_cubes");
    for n in [32, 64, 128] {
        let field = sphere(n);
        group.bench_with_input(BenchmarkId::new("sphere", n), &field, |b, f| {
            b.iter(|| extract_surface(&engine, black_box(f), VoxelSpacing::UNIT, 1))
        });
    }
    let field = sphere(128);
    group.bench_function("sphere_128_step2", |b| {
        b.iter(|| extract_surface(&engine, black_box(&field), VoxelSpacing::UNIT, 2))
    });
    group.finish();
}

criterion_group!(benches, bench_marching_cubes);
criterion_main!(benches);
