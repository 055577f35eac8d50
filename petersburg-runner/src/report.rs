//! Human-readable text reports.

use std::fmt::Write;

use petersburg_core::FlipBucket;

use crate::runner::SimulationResult;

/// Labeled summary of a simulation run. Each statistic appears exactly once.
pub fn format_report(result: &SimulationResult) -> String {
    let stats = &result.statistics;
    let mut out = String::with_capacity(512);

    let _ = writeln!(
        out,
        "Through {} samples of {} trials each, the sample means had the following properties:",
        result.num_samples, result.num_trials
    );
    let _ = writeln!(out, "Mean: {}", format_value(stats.mean));
    let _ = writeln!(out, "Median: {}", format_value(stats.median));
    let _ = writeln!(out, "Standard Deviation: {}", format_value(stats.std_dev));
    let _ = writeln!(
        out,
        "Range: {} to {}",
        format_value(stats.min),
        format_value(stats.max)
    );
    let _ = writeln!(out, "Skewness: {}", format_value(stats.skewness));
    let _ = writeln!(out, "Excess Kurtosis: {}", format_value(stats.excess_kurtosis));
    let _ = writeln!(
        out,
        "Seed: {}{}",
        result.master_seed,
        if result.parallel { " (parallel)" } else { "" }
    );
    out
}

/// Observed vs. geometric flip-count frequencies as an aligned table.
pub fn format_flip_table(buckets: &[FlipBucket], total_trials: u64) -> String {
    let mut out = String::with_capacity(64 * (buckets.len() + 3));
    let _ = writeln!(out, "Flip counts over {total_trials} trials:");
    let _ = writeln!(
        out,
        "{:<8} {:>12} {:>12} {:>12}",
        "Flips", "Observed", "Frequency", "Expected"
    );
    let _ = writeln!(out, "{}", "-".repeat(47));
    for bucket in buckets {
        let label = if bucket.open_ended {
            format!(">{}", bucket.flips)
        } else {
            bucket.flips.to_string()
        };
        let _ = writeln!(
            out,
            "{:<8} {:>12} {:>12.6} {:>12.6}",
            label, bucket.observed, bucket.observed_frequency, bucket.expected_frequency
        );
    }
    out
}

/// Four decimals for finite values; `NaN` / `inf` / `-inf` spelled out.
fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SCHEMA_VERSION;
    use chrono::Utc;
    use petersburg_core::{FlipHistogram, MomentStatistics};

    fn result_for(samples: Vec<f64>) -> SimulationResult {
        let statistics = MomentStatistics::compute(&samples).unwrap();
        SimulationResult {
            schema_version: SCHEMA_VERSION,
            num_samples: samples.len(),
            num_trials: 1_000,
            master_seed: 42,
            parallel: false,
            samples,
            statistics,
            started_at: Utc::now(),
            duration_secs: 0.5,
        }
    }

    #[test]
    fn report_labels_every_statistic_once() {
        let report = format_report(&result_for(vec![1.0, 2.0, 3.0, 4.0, 5.0]));
        for label in [
            "Mean:",
            "Median:",
            "Standard Deviation:",
            "Range:",
            "Skewness:",
            "Excess Kurtosis:",
        ] {
            let count = report.lines().filter(|l| l.starts_with(label)).count();
            assert_eq!(count, 1, "{label} appears {count} times in:\n{report}");
        }
        assert!(report.starts_with("Through 5 samples of 1000 trials each"));
    }

    #[test]
    fn report_values() {
        let report = format_report(&result_for(vec![1.0, 2.0, 3.0, 4.0, 5.0]));
        assert!(report.contains("Mean: 3.0000"));
        assert!(report.contains("Median: 3.0000"));
        assert!(report.contains("Standard Deviation: 1.5811"));
        assert!(report.contains("Range: 1.0000 to 5.0000"));
        assert!(report.contains("Skewness: 0.0000"));
        assert!(report.contains("Excess Kurtosis: -1.3000"));
        assert!(report.contains("Seed: 42"));
    }

    #[test]
    fn degenerate_statistics_print_as_nan() {
        let report = format_report(&result_for(vec![5.0, 5.0, 5.0]));
        assert!(report.contains("Skewness: NaN"));
        assert!(report.contains("Excess Kurtosis: NaN"));
        assert!(report.contains("Standard Deviation: 0.0000"));
    }

    #[test]
    fn flip_table_has_row_per_bucket() {
        let mut histogram = FlipHistogram::new();
        for flips in [1, 1, 2, 6] {
            histogram.record(flips);
        }
        let table = format_flip_table(&histogram.buckets(3), histogram.total());
        let lines: Vec<&str> = table.lines().collect();
        // title + header + rule + 3 buckets + tail
        assert_eq!(lines.len(), 7);
        assert!(lines[3].starts_with("1 "));
        assert!(lines[6].starts_with(">3"));
        assert!(table.contains("0.500000"));
    }
}
