//! Petersburg Core: coin-flip game simulator and moment statistics.
//!
//! This crate contains the numerical heart of the St. Petersburg simulation:
//! - Single trials (flip until heads, payoff `2^n`) with no cap on the tail
//! - Per-sample averaging with compensated summation
//! - Seed hierarchy: one master seed, BLAKE3-derived per-sample sub-seeds
//! - Two-pass moment statistics (mean, variance, skewness, kurtosis, median, range)
//! - Flip-count histograms against the geometric law
//!
//! Everything here is pure computation; progress, configuration and output
//! live in `petersburg-runner`.

pub mod distribution;
pub mod game;
pub mod rng;
pub mod stats;

pub use distribution::{FlipBucket, FlipHistogram};
pub use game::{flip_until_heads, payoff, play_trial, sample_mean, GameSimulator, MIN_PAYOFF};
pub use rng::SeedHierarchy;
pub use stats::{MomentStatistics, StatsError, MIN_SAMPLES};
