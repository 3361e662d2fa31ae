//! Criterion benchmarks for the tour engine.
//!
//! Points are drawn uniformly from a square with a fixed seed so runs are
//! comparable across changes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tour_anneal::sa::{propose_move, AnnealConfig, AnnealRunner};
use tour_anneal::tour::{Point, Tour};

fn scattered(n: usize) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| Point::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect()
}

// ===========================================================================
// Single 2-opt move (exchange + reversal walk + full length)
// ===========================================================================

fn bench_propose_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("propose_move");

    for &n in &[50usize, 200, 1000] {
        let points = scattered(n);
        let base = Tour::identity(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut scratch = base.clone();
            b.iter(|| {
                scratch.clone_from(&base);
                black_box(propose_move(&mut scratch, black_box(points), &mut rng))
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Full annealing run
// ===========================================================================

fn bench_anneal_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_run");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let points = scattered(n);
        let config = AnnealConfig::default()
            .with_max_iterations(10_000)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(points, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = AnnealRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_propose_move, bench_anneal_run);
criterion_main!(benches);
