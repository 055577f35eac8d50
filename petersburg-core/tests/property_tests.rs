//! Property tests for simulator and aggregator invariants.
//!
//! Uses proptest to verify:
//! 1. Every sample mean is at least the minimum payoff
//! 2. Single-trial samples are exact powers of two
//! 3. min <= median <= max and variance >= 0 for any sample set
//! 4. The aggregator is idempotent and ignores input order for moments

use proptest::prelude::*;
use std::num::NonZeroU64;

use petersburg_core::{GameSimulator, MomentStatistics, SeedHierarchy, MIN_PAYOFF};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(2.0..1.0e6_f64, 2..200)
}

// ── 1–2. Simulator ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sample_means_never_below_minimum_payoff(
        seed in any::<u64>(),
        trials in 1u64..200,
        samples in 1usize..20,
    ) {
        let mut sim = GameSimulator::new(
            SeedHierarchy::new(seed).master_rng(),
            NonZeroU64::new(trials).unwrap(),
        );
        for mean in sim.run(samples) {
            prop_assert!(mean >= MIN_PAYOFF, "sample mean {} below {}", mean, MIN_PAYOFF);
        }
    }

    #[test]
    fn single_trial_samples_are_powers_of_two(seed in any::<u64>()) {
        let mut sim = GameSimulator::new(
            SeedHierarchy::new(seed).master_rng(),
            NonZeroU64::new(1).unwrap(),
        );
        for mean in sim.run(50) {
            let exponent = mean.log2();
            prop_assert!(exponent >= 1.0);
            prop_assert_eq!(exponent.fract(), 0.0);
        }
    }
}

// ── 3–4. Aggregator ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn median_lies_within_range(samples in arb_samples()) {
        let stats = MomentStatistics::compute(&samples).unwrap();
        prop_assert!(stats.min <= stats.median);
        prop_assert!(stats.median <= stats.max);
        prop_assert!(stats.variance >= 0.0);
        prop_assert!(stats.std_dev >= 0.0);
        prop_assert!(stats.mean >= stats.min * (1.0 - 1e-12));
        prop_assert!(stats.mean <= stats.max * (1.0 + 1e-12));
    }

    #[test]
    fn aggregation_is_idempotent(samples in arb_samples()) {
        let a = MomentStatistics::compute(&samples).unwrap();
        let b = MomentStatistics::compute(&samples).unwrap();
        prop_assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        prop_assert_eq!(a.variance.to_bits(), b.variance.to_bits());
        prop_assert_eq!(a.skewness.to_bits(), b.skewness.to_bits());
        prop_assert_eq!(a.excess_kurtosis.to_bits(), b.excess_kurtosis.to_bits());
        prop_assert_eq!(a.median.to_bits(), b.median.to_bits());
    }

    #[test]
    fn order_statistics_ignore_input_order(samples in arb_samples()) {
        let mut reversed = samples.clone();
        reversed.reverse();
        let forward = MomentStatistics::compute(&samples).unwrap();
        let backward = MomentStatistics::compute(&reversed).unwrap();
        prop_assert_eq!(forward.median, backward.median);
        prop_assert_eq!(forward.min, backward.min);
        prop_assert_eq!(forward.max, backward.max);
        prop_assert!((forward.mean - backward.mean).abs() <= forward.mean.abs() * 1e-12);
    }

    #[test]
    fn excess_kurtosis_is_bounded_below(samples in arb_samples()) {
        // Raw kurtosis >= 1 for any distribution, so excess >= -2.
        let stats = MomentStatistics::compute(&samples).unwrap();
        if stats.variance > 0.0 {
            prop_assert!(stats.excess_kurtosis >= -2.0 - 1e-9);
        }
    }
}
