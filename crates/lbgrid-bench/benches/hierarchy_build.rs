//! Criterion benchmarks for whole-hierarchy construction.

use criterion::{criterion_group, criterion_main, Criterion};
use lbgrid_bench::{reference_profile, stress_profile, tiled_regions};
use lbgrid_grid::Hierarchy;
use std::hint::black_box;

fn bench_build_reference_2d(c: &mut Criterion) {
    let config = reference_profile();

    c.bench_function("build_reference_2d", |b| {
        b.iter(|| {
            let h = Hierarchy::build(black_box(&config)).unwrap();
            black_box(&h);
        });
    });
}

fn bench_build_stress_3d(c: &mut Criterion) {
    let config = stress_profile();

    let mut group = c.benchmark_group("build_stress_3d");
    group.sample_size(10);
    group.bench_function("build", |b| {
        b.iter(|| {
            let h = Hierarchy::build(black_box(&config)).unwrap();
            black_box(&h);
        });
    });
    group.finish();
}

/// Benchmark: 32 sibling regions on one level, so per-region overhead
/// dominates over cell work.
fn bench_build_tiled_regions(c: &mut Criterion) {
    let config = tiled_regions(512, 32);

    c.bench_function("build_tiled_32_regions", |b| {
        b.iter(|| {
            let h = Hierarchy::build(black_box(&config)).unwrap();
            black_box(&h);
        });
    });
}

criterion_group!(
    benches,
    bench_build_reference_2d,
    bench_build_stress_3d,
    bench_build_tiled_regions
);
criterion_main!(benches);
