//! Petersburg Runner: simulation orchestration, progress, reports, export.
//!
//! This crate builds on `petersburg-core` to provide:
//! - TOML-backed configuration with startup validation
//! - Sequential and rayon-parallel simulation runs with reproducible seeds
//! - Decile progress reporting through a callback trait
//! - Text reports and JSON/CSV artifact export

pub mod config;
pub mod export;
pub mod progress;
pub mod report;
pub mod runner;

pub use config::{ConfigError, SimulationConfig, DEFAULT_NUM_SAMPLES, DEFAULT_NUM_TRIALS};
pub use export::{
    export_json, export_samples_csv, import_json, load_artifacts, save_artifacts,
};
pub use progress::{SilentProgress, SimulationProgress, StdoutProgress};
pub use report::{format_flip_table, format_report};
pub use runner::{run_simulation, RunError, SimulationResult, SCHEMA_VERSION};
