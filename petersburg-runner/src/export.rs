//! Export: JSON and CSV artifact generation.
//!
//! Provides two export formats for simulation results:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the per-sample means for external analysis tools
//!
//! Raw trial payoffs are never persisted; the sample means are the finest
//! grain written. All persisted artifacts include a `schema_version` field.
//! Unknown versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::runner::{SimulationResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationResult` to pretty JSON.
pub fn export_json(result: &SimulationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize SimulationResult to JSON")
}

/// Deserialize a `SimulationResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SimulationResult> {
    let result: SimulationResult =
        serde_json::from_str(json).context("failed to deserialize SimulationResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export sample means as CSV with sample_index and sample_mean columns.
pub fn export_samples_csv(samples: &[f64]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["sample_index", "sample_mean"])?;
    for (i, mean) in samples.iter().enumerate() {
        wtr.write_record([i.to_string(), mean.to_string()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a simulation run.
///
/// Creates a directory named `petersburg_{seed}_{timestamp}/` under
/// `output_dir` containing:
/// - `manifest.json`: the full `SimulationResult`
/// - `samples.csv`: sample means in sample-index order
///
/// Returns the path to the created directory.
pub fn save_artifacts(result: &SimulationResult, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "petersburg_{}_{}",
        result.master_seed,
        result.started_at.format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(result)?;
    std::fs::write(run_dir.join("manifest.json"), &json)
        .with_context(|| format!("failed to write manifest in {}", run_dir.display()))?;

    let samples_csv = export_samples_csv(&result.samples)?;
    std::fs::write(run_dir.join("samples.csv"), &samples_csv)
        .with_context(|| format!("failed to write samples in {}", run_dir.display()))?;

    Ok(run_dir)
}

/// Load a `SimulationResult` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<SimulationResult> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}
