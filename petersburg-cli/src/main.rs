//! Petersburg CLI: run the St. Petersburg paradox simulation.
//!
//! Commands:
//! - `run`: simulate sample means and report their moment statistics
//! - `flips`: tally single-trial flip counts against the geometric law

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use petersburg_core::{FlipHistogram, SeedHierarchy};
use petersburg_runner::{
    export_json, format_flip_table, format_report, run_simulation, save_artifacts,
    SilentProgress, SimulationConfig, SimulationProgress, StdoutProgress,
};

#[derive(Parser)]
#[command(
    name = "petersburg",
    about = "Monte Carlo simulation of the St. Petersburg paradox"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate sample means and report their statistics.
    Run {
        /// Path to a TOML config file. Flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of sample means to draw (default 500).
        #[arg(long)]
        samples: Option<usize>,

        /// Trials averaged into each sample mean (default 1000000).
        #[arg(long)]
        trials: Option<u64>,

        /// Master seed. Omit to seed from OS entropy.
        #[arg(long)]
        seed: Option<u64>,

        /// Spread samples across worker threads.
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Worker thread count (implies --parallel).
        #[arg(long)]
        threads: Option<usize>,

        /// Print the full result as JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save manifest.json and samples.csv under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Tally how many flips single trials take.
    Flips {
        /// Number of single trials to play.
        #[arg(long, default_value_t = 100_000)]
        trials: u64,

        /// Master seed. Omit to seed from OS entropy.
        #[arg(long)]
        seed: Option<u64>,

        /// Rows before the open-ended tail bucket.
        #[arg(long, default_value_t = 12)]
        max_flips: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            samples,
            trials,
            seed,
            parallel,
            threads,
            json,
            output_dir,
        } => {
            let mut sim_config = match config {
                Some(path) => SimulationConfig::from_file(&path)?,
                None => SimulationConfig::default(),
            };
            if let Some(n) = samples {
                sim_config.num_samples = n;
            }
            if let Some(n) = trials {
                sim_config.num_trials = n;
            }
            if seed.is_some() {
                sim_config.seed = seed;
            }
            if parallel || threads.is_some() {
                sim_config.parallel = true;
            }
            if threads.is_some() {
                sim_config.threads = threads;
            }
            run_cmd(&sim_config, json, output_dir)
        }
        Commands::Flips {
            trials,
            seed,
            max_flips,
        } => run_flips(trials, seed, max_flips),
    }
}

fn run_cmd(config: &SimulationConfig, json: bool, output_dir: Option<PathBuf>) -> Result<()> {
    let progress: &dyn SimulationProgress = if json {
        &SilentProgress
    } else {
        &StdoutProgress
    };

    let result = run_simulation(config, progress).context("simulation failed")?;

    if json {
        println!("{}", export_json(&result)?);
    } else {
        println!();
        print!("{}", format_report(&result));
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&result, &dir)?;
        if !json {
            println!("Artifacts saved to: {}", run_dir.display());
        }
    }

    Ok(())
}

fn run_flips(trials: u64, seed: Option<u64>, max_flips: u32) -> Result<()> {
    let seeds = SeedHierarchy::resolve(seed);
    let mut rng = seeds.master_rng();
    let histogram = FlipHistogram::sample(&mut rng, trials);

    print!("{}", format_flip_table(&histogram.buckets(max_flips), histogram.total()));
    if let Some(longest) = histogram.max_flips() {
        println!("Longest run: {longest} flips");
    }
    println!("Seed: {}", seeds.master_seed());
    Ok(())
}
