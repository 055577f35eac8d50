//! Criterion benchmarks for the simulation hot paths.
//!
//! Benchmarks:
//! 1. Single trial (flip loop + payoff)
//! 2. One sample mean at several trial counts
//! 3. Moment statistics over sample sets of several sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::num::NonZeroU64;

use petersburg_core::{play_trial, sample_mean, GameSimulator, MomentStatistics, SeedHierarchy};

fn bench_trial(c: &mut Criterion) {
    let mut rng = SeedHierarchy::new(42).master_rng();
    c.bench_function("play_trial", |b| b.iter(|| black_box(play_trial(&mut rng))));
}

fn bench_sample_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_mean");
    for trials in [1_000u64, 10_000, 100_000] {
        let num_trials = NonZeroU64::new(trials).unwrap_or(NonZeroU64::MIN);
        group.bench_with_input(BenchmarkId::from_parameter(trials), &num_trials, |b, &n| {
            let mut rng = SeedHierarchy::new(42).master_rng();
            b.iter(|| black_box(sample_mean(&mut rng, n)));
        });
    }
    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("moment_statistics");
    for num_samples in [100usize, 500, 5_000] {
        let samples = GameSimulator::new(
            SeedHierarchy::new(7).master_rng(),
            NonZeroU64::new(100).unwrap_or(NonZeroU64::MIN),
        )
        .run(num_samples);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_samples),
            &samples,
            |b, samples| b.iter(|| black_box(MomentStatistics::compute(samples))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_trial, bench_sample_mean, bench_statistics);
criterion_main!(benches);
