//! Benchmarks for render window calculation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::expect_fun_call,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridview::layout::{AxisCalcRequest, AxisCalculator, ColumnStretch, StretchMode};

/// Benchmark the forward walk at various scroll depths.
fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");
    for &scroll in &[0.0f32, 10_000.0, 100_000.0] {
        group.bench_with_input(
            BenchmarkId::new("uniform_rows", scroll as u32),
            &scroll,
            |b, &scroll| {
                b.iter(|| {
                    let mut calculator = AxisCalculator::new(
                        AxisCalcRequest::new(600.0, black_box(scroll), 1_000_000)
                            .with_default_size(24.0)
                            .only_fully_visible(true),
                    );
                    calculator.calculate(&|_| Some(24.0), None)
                })
            },
        );
    }
    group.finish();
}

/// Benchmark the backward re-anchor path (scroll past the end).
fn bench_reanchor(c: &mut Criterion) {
    c.bench_function("calculate_reanchor", |b| {
        b.iter(|| {
            let mut calculator = AxisCalculator::new(
                AxisCalcRequest::new(600.0, black_box(23_900_000.0), 1_000_000)
                    .with_default_size(24.0)
                    .only_fully_visible(true),
            );
            calculator.calculate(&|_| Some(24.0), None)
        })
    });
}

/// Benchmark a full stretch refresh plus width lookups.
fn bench_stretching(c: &mut Criterion) {
    c.bench_function("refresh_stretching_10k_cols", |b| {
        b.iter(|| {
            let mut stretch = ColumnStretch::new(StretchMode::All);
            stretch.refresh_stretching(black_box(1920.0), 10_000, &|_| Some(64.0), 64.0);
            (0..10_000u32)
                .map(|i| stretch.stretched_width(i, 64.0).unwrap_or(64.0))
                .sum::<f32>()
        })
    });
}

criterion_group!(benches, bench_calculate, bench_reanchor, bench_stretching);
criterion_main!(benches);
