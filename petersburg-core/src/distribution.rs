//! Flip-count distribution diagnostics.
//!
//! Tallies how many flips single trials needed and compares the observed
//! frequencies with the geometric law `P(n) = 0.5^n`.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{flip_until_heads, payoff};

/// Probability that a trial ends after exactly `flips` draws.
pub fn geometric_probability(flips: u32) -> f64 {
    if flips == 0 {
        return 0.0;
    }
    payoff(flips).recip()
}

/// Probability that a trial needs more than `flips` draws.
pub fn geometric_tail_probability(flips: u32) -> f64 {
    // P(N > k) = 0.5^k, which coincides with P(N = k).
    payoff(flips).recip()
}

/// One row of a histogram report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipBucket {
    /// Flip count, or the lower exclusive bound when `open_ended`.
    pub flips: u32,
    /// True for the "more than `flips`" bucket.
    pub open_ended: bool,
    pub observed: u64,
    pub observed_frequency: f64,
    pub expected_frequency: f64,
}

/// Counts of trials by number of flips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipHistogram {
    counts: BTreeMap<u32, u64>,
    total: u64,
}

impl FlipHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `trials` single games and tally their flip counts.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, trials: u64) -> Self {
        let mut histogram = Self::new();
        for _ in 0..trials {
            histogram.record(flip_until_heads(rng));
        }
        histogram
    }

    pub fn record(&mut self, flips: u32) {
        *self.counts.entry(flips).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, flips: u32) -> u64 {
        self.counts.get(&flips).copied().unwrap_or(0)
    }

    /// Longest run observed, `None` when empty.
    pub fn max_flips(&self) -> Option<u32> {
        self.counts.keys().next_back().copied()
    }

    pub fn frequency(&self, flips: u32) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(flips) as f64 / self.total as f64
    }

    /// Buckets `1..=max_flips`, followed by one open-ended bucket for
    /// everything longer.
    pub fn buckets(&self, max_flips: u32) -> Vec<FlipBucket> {
        let mut rows: Vec<FlipBucket> = (1..=max_flips)
            .map(|flips| FlipBucket {
                flips,
                open_ended: false,
                observed: self.count(flips),
                observed_frequency: self.frequency(flips),
                expected_frequency: geometric_probability(flips),
            })
            .collect();

        let tail: u64 = self.counts.range(max_flips.saturating_add(1)..).map(|(_, c)| c).sum();
        rows.push(FlipBucket {
            flips: max_flips,
            open_ended: true,
            observed: tail,
            observed_frequency: if self.total == 0 {
                0.0
            } else {
                tail as f64 / self.total as f64
            },
            expected_frequency: geometric_tail_probability(max_flips),
        });
        rows
    }
}
