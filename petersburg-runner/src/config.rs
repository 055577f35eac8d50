//! Serializable simulation configuration.

use std::path::{Path, PathBuf};

use petersburg_core::MIN_SAMPLES;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of sample means per run.
pub const DEFAULT_NUM_SAMPLES: usize = 500;

/// Default number of trials averaged into each sample mean.
pub const DEFAULT_NUM_TRIALS: u64 = 1_000_000;

/// Configuration errors. All of them are raised before any simulation work.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_trials must be at least 1 (a sample mean over zero trials is undefined)")]
    ZeroTrials,
    #[error("num_samples must be at least {}, got {num_samples}", MIN_SAMPLES)]
    TooFewSamples { num_samples: usize },
    #[error("threads must be at least 1")]
    ZeroThreads,
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything needed to reproduce a run.
///
/// ```toml
/// num_samples = 500
/// num_trials = 1000000
/// seed = 42          # omit to seed from OS entropy
/// parallel = true
/// threads = 8        # omit for the rayon default
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of independent sample means to draw.
    pub num_samples: usize,
    /// Trials averaged into each sample mean.
    pub num_trials: u64,
    /// Master seed; `None` draws one from OS entropy at startup.
    pub seed: Option<u64>,
    /// Spread samples across a rayon pool.
    pub parallel: bool,
    /// Pool size for parallel runs.
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_samples: DEFAULT_NUM_SAMPLES,
            num_trials: DEFAULT_NUM_TRIALS,
            seed: None,
            parallel: false,
            threads: None,
        }
    }
}

impl SimulationConfig {
    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject configurations the statistics are undefined for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.num_samples < MIN_SAMPLES {
            return Err(ConfigError::TooFewSamples {
                num_samples: self.num_samples,
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}
