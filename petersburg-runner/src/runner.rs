//! Simulation runner: wires together config, seeds, simulator, and statistics.
//!
//! Two execution modes:
//! - Sequential: one generator seeded with the master seed feeds every flip of
//!   every sample, in sample order.
//! - Parallel: samples are spread over a rayon pool; sample `i` draws from its
//!   own generator seeded with `SeedHierarchy::sub_seed(i)`, so the output is
//!   identical for any thread count.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use petersburg_core::{sample_mean, GameSimulator, MomentStatistics, SeedHierarchy, StatsError};

use crate::config::{ConfigError, SimulationConfig};
use crate::progress::{decile_percent, SimulationProgress};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub num_samples: usize,
    pub num_trials: u64,
    /// Seed that reproduces this run (together with `parallel`).
    pub master_seed: u64,
    pub parallel: bool,
    /// Sample means in sample-index order.
    pub samples: Vec<f64>,
    pub statistics: MomentStatistics,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SimulationResult {
    /// Config that replays this run exactly.
    pub fn replay_config(&self) -> SimulationConfig {
        SimulationConfig {
            num_samples: self.num_samples,
            num_trials: self.num_trials,
            seed: Some(self.master_seed),
            parallel: self.parallel,
            threads: None,
        }
    }
}

/// Validate `config`, simulate every sample, and aggregate the statistics.
pub fn run_simulation(
    config: &SimulationConfig,
    progress: &dyn SimulationProgress,
) -> Result<SimulationResult, RunError> {
    config.validate()?;
    let num_trials = NonZeroU64::new(config.num_trials).ok_or(ConfigError::ZeroTrials)?;
    let seeds = SeedHierarchy::resolve(config.seed);

    let started_at = Utc::now();
    let clock = Instant::now();
    progress.on_start(config.num_samples, config.num_trials);

    let samples = if config.parallel {
        simulate_parallel(&seeds, config.num_samples, num_trials, config.threads, progress)?
    } else {
        simulate_sequential(&seeds, config.num_samples, num_trials, progress)
    };

    let statistics = MomentStatistics::compute(&samples)?;
    let duration_secs = clock.elapsed().as_secs_f64();
    progress.on_complete(samples.len(), duration_secs);

    Ok(SimulationResult {
        schema_version: SCHEMA_VERSION,
        num_samples: config.num_samples,
        num_trials: config.num_trials,
        master_seed: seeds.master_seed(),
        parallel: config.parallel,
        samples,
        statistics,
        started_at,
        duration_secs,
    })
}

/// Draw every sample from the single master generator, in order.
pub fn simulate_sequential(
    seeds: &SeedHierarchy,
    num_samples: usize,
    num_trials: NonZeroU64,
    progress: &dyn SimulationProgress,
) -> Vec<f64> {
    let mut simulator = GameSimulator::new(seeds.master_rng(), num_trials);
    simulator.run_with(num_samples, |index| {
        if let Some(percent) = decile_percent(index, num_samples) {
            progress.on_decile(percent);
        }
    })
}

/// Draw samples on a rayon pool, one derived generator per sample.
///
/// `threads = None` uses the global pool. Deciles are counted by samples
/// started, so reports stay monotonic even though samples finish out of order.
pub fn simulate_parallel(
    seeds: &SeedHierarchy,
    num_samples: usize,
    num_trials: NonZeroU64,
    threads: Option<usize>,
    progress: &dyn SimulationProgress,
) -> Result<Vec<f64>, RunError> {
    let started = AtomicUsize::new(0);
    let work = || -> Vec<f64> {
        (0..num_samples)
            .into_par_iter()
            .map(|index| {
                let ticket = started.fetch_add(1, Ordering::Relaxed);
                if let Some(percent) = decile_percent(ticket, num_samples) {
                    progress.on_decile(percent);
                }
                let mut rng = seeds.rng_for_sample(index as u64);
                sample_mean(&mut rng, num_trials)
            })
            .collect()
    };

    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}
