//! The St. Petersburg coin-flip game.
//!
//! One trial flips a fair coin until the first heads; with `n` flips the
//! payoff is `2^n`. A sample averages `num_trials` independent trials. The
//! flip loop has no cap: the heavy right tail is the object of study.

use std::num::NonZeroU64;

use rand::Rng;

/// Smallest possible payoff (heads on the first flip).
pub const MIN_PAYOFF: f64 = 2.0;

/// Draw fair coin flips until heads and return how many draws were made.
///
/// The first draw counts, so the result is always `>= 1`. Follows
/// `P(n) = 0.5^n`.
pub fn flip_until_heads<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let mut flips: u32 = 1;
    while !rng.gen_bool(0.5) {
        flips = flips.saturating_add(1);
    }
    flips
}

/// Payoff for a trial that ended after `flips` draws: `2^flips`.
///
/// Beyond 1023 flips this is `+inf`; the value is never clamped.
pub fn payoff(flips: u32) -> f64 {
    i32::try_from(flips).map_or(f64::INFINITY, |n| 2f64.powi(n))
}

/// Play one full trial and return its payoff.
pub fn play_trial<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    payoff(flip_until_heads(rng))
}

/// Average payoff over `num_trials` independent trials.
pub fn sample_mean<R: Rng + ?Sized>(rng: &mut R, num_trials: NonZeroU64) -> f64 {
    let mut total = CompensatedSum::default();
    for _ in 0..num_trials.get() {
        total.add(play_trial(rng));
    }
    total.value() / num_trials.get() as f64
}

/// Neumaier compensated summation.
///
/// Payoffs mix values of wildly different magnitude (2 next to 2^40), so a
/// plain running sum would drop the low-order contributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if t.is_finite() {
            if self.sum.abs() >= value.abs() {
                self.compensation += (self.sum - t) + value;
            } else {
                self.compensation += (value - t) + self.sum;
            }
        }
        self.sum = t;
    }

    pub fn value(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}

/// Owns a generator and produces sample means one at a time.
///
/// The generator is never reseeded: every flip of every trial in every sample
/// advances the same stream.
#[derive(Debug, Clone)]
pub struct GameSimulator<R> {
    rng: R,
    num_trials: NonZeroU64,
}

impl<R: Rng> GameSimulator<R> {
    pub fn new(rng: R, num_trials: NonZeroU64) -> Self {
        Self { rng, num_trials }
    }

    pub fn num_trials(&self) -> NonZeroU64 {
        self.num_trials
    }

    pub fn play_trial(&mut self) -> f64 {
        play_trial(&mut self.rng)
    }

    pub fn next_sample(&mut self) -> f64 {
        sample_mean(&mut self.rng, self.num_trials)
    }

    /// Produce `num_samples` sample means in sample-index order.
    pub fn run(&mut self, num_samples: usize) -> Vec<f64> {
        self.run_with(num_samples, |_| {})
    }

    /// Like [`run`](Self::run), calling `before_sample(index)` ahead of each
    /// sample. The hook cannot touch the generator.
    pub fn run_with<F>(&mut self, num_samples: usize, mut before_sample: F) -> Vec<f64>
    where
        F: FnMut(usize),
    {
        let mut samples = Vec::with_capacity(num_samples);
        for index in 0..num_samples {
            before_sample(index);
            samples.push(self.next_sample());
        }
        samples
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}
