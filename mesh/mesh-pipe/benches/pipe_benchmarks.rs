//! Benchmarks for mesh-pipe generation.
//!
//! Run with: cargo bench -p mesh-pipe
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-pipe -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-pipe -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_pipe::{FrameSampler, PipeConfig, generate_all};
use nalgebra::Point3;

// =============================================================================
// Test Routes
// =============================================================================

/// Zig-zag route climbing one unit per corner.
fn zigzag(corners: usize, x_offset: f64) -> Vec<Point3<f64>> {
    (0..corners + 2)
        .map(|i| {
            let z = if i % 2 == 0 { 0.0 } else { 8.0 };
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64;
            Point3::new(x_offset + t * 3.0, t, z)
        })
        .collect()
}

fn pipe_network(pipes: usize, corners: usize) -> Vec<Vec<Point3<f64>>> {
    (0..pipes)
        .map(|p| {
            #[allow(clippy::cast_precision_loss)]
            let offset = p as f64 * 5.0;
            zigzag(corners, offset)
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("FrameSampling");

    for corners in [4, 32, 256] {
        let route = zigzag(corners, 0.0);
        let sampler = FrameSampler::from_config(&PipeConfig::default());

        group.throughput(Throughput::Elements(corners as u64));
        group.bench_with_input(BenchmarkId::new("sample", corners), &route, |b, route| {
            b.iter(|| sampler.sample(black_box(route)));
        });
    }

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Generation");
    group.sample_size(30);

    let test_cases = [
        ("1pipe_8corners", pipe_network(1, 8)),
        ("16pipes_8corners", pipe_network(16, 8)),
        ("64pipes_16corners", pipe_network(64, 16)),
    ];

    for (name, pipes) in &test_cases {
        group.bench_with_input(BenchmarkId::new("plain", name), pipes, |b, pipes| {
            let config = PipeConfig::plain();
            b.iter(|| generate_all(black_box(pipes), black_box(&config)));
        });

        group.bench_with_input(BenchmarkId::new("industrial", name), pipes, |b, pipes| {
            let config = PipeConfig::industrial().with_edge_count(16);
            b.iter(|| generate_all(black_box(pipes), black_box(&config)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_sampling, bench_generation);
criterion_main!(benches);
