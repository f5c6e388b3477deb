//! Criterion benchmarks for mode-catalog generation.
//!
//! Mode queries arrive on the display stack's calling thread and must run to
//! completion without blocking it, so regeneration of the full 90-entry
//! catalog needs to stay cheap.  Nothing is cached between queries, which
//! makes this the path worth watching.
//!
//! Run with:
//! ```bash
//! cargo bench --package vdd-core --bench mode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vdd_core::{default_modes, target_modes, MODE_COUNT};

fn bench_default_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_modes");
    for capacity in [0usize, MODE_COUNT] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| b.iter(|| default_modes(black_box(capacity))),
        );
    }
    group.finish();
}

fn bench_target_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("target_modes");
    for capacity in [0usize, MODE_COUNT] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| b.iter(|| target_modes(black_box(capacity))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_default_modes, bench_target_modes);
criterion_main!(benches);
