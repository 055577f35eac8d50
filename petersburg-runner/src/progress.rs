//! Progress reporting for simulation runs.
//!
//! The runner announces the start, each decile of samples, and completion.
//! Reporters only observe; nothing they do can reach the generator.

/// Progress callback for a simulation run.
pub trait SimulationProgress: Send + Sync {
    /// Called once before the first sample.
    fn on_start(&self, num_samples: usize, num_trials: u64);

    /// Called when the sample counter reaches a decile boundary.
    fn on_decile(&self, percent: usize);

    /// Called after the statistics are computed.
    fn on_complete(&self, num_samples: usize, elapsed_secs: f64);
}

/// Prints progress lines to stdout.
pub struct StdoutProgress;

impl SimulationProgress for StdoutProgress {
    fn on_start(&self, _num_samples: usize, _num_trials: u64) {
        println!("Calculating payoffs:");
    }

    fn on_decile(&self, percent: usize) {
        println!("{percent} percent done.");
    }

    fn on_complete(&self, num_samples: usize, elapsed_secs: f64) {
        println!("Simulated {num_samples} samples in {elapsed_secs:.2}s");
    }
}

/// Discards all progress events.
pub struct SilentProgress;

impl SimulationProgress for SilentProgress {
    fn on_start(&self, _num_samples: usize, _num_trials: u64) {}
    fn on_decile(&self, _percent: usize) {}
    fn on_complete(&self, _num_samples: usize, _elapsed_secs: f64) {}
}

/// Samples between decile reports; at least 1 so tiny runs still report.
pub fn decile_step(num_samples: usize) -> usize {
    (num_samples / 10).max(1)
}

/// Percent complete to report before sample `index`, if it starts a decile.
pub fn decile_percent(index: usize, num_samples: usize) -> Option<usize> {
    if num_samples == 0 || index >= num_samples || index % decile_step(num_samples) != 0 {
        return None;
    }
    Some(100 * index / num_samples)
}
