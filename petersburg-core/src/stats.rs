//! Moment statistics over a set of sample means.
//!
//! Two passes over the samples: the first computes the mean, the second
//! accumulates the central sums `Σd²`, `Σd³`, `Σd⁴`. Median and range come
//! from a sorted copy, so the caller's sample order is left untouched.
//!
//! Conventions, kept deliberately:
//! - `variance` is the unbiased estimator, `Σd² / (n - 1)`.
//! - `skewness` normalizes by the *population* second moment:
//!   `(Σd³ / n) / sqrt((Σd² / n)^3)`.
//! - `excess_kurtosis` is `n · Σd⁴ / (Σd²)² - 3`.
//! - `median` is `sorted[n / 2]`, the upper-middle element for even `n`.
//!
//! Zero spread makes skewness and kurtosis `NaN`; those values propagate
//! rather than being reported as errors.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Fewest samples the unbiased variance is defined for.
pub const MIN_SAMPLES: usize = 2;

/// Errors from the statistics aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("insufficient samples: {count} < minimum {}", MIN_SAMPLES)]
    InsufficientSamples { count: usize },
}

/// Descriptive statistics of a sample set.
///
/// JSON has no encoding for non-finite floats; they serialize as `null` and
/// read back as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentStatistics {
    pub sample_count: usize,
    #[serde(deserialize_with = "null_as_nan")]
    pub mean: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub variance: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub std_dev: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub skewness: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub excess_kurtosis: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub median: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub min: f64,
    #[serde(deserialize_with = "null_as_nan")]
    pub max: f64,
}

impl MomentStatistics {
    /// Compute every statistic from the full sample set.
    pub fn compute(samples: &[f64]) -> Result<Self, StatsError> {
        let count = samples.len();
        if count < MIN_SAMPLES {
            return Err(StatsError::InsufficientSamples { count });
        }
        let n = count as f64;

        let mean = samples.iter().sum::<f64>() / n;
        let sums = CentralSums::accumulate(samples, mean);

        let variance = sums.d2 / (n - 1.0);
        let std_dev = variance.sqrt();

        let population_m2 = sums.d2 / n;
        let skewness = (sums.d3 / n) / (population_m2 * population_m2 * population_m2).sqrt();

        let raw_kurtosis = sums.d4 * (n / (sums.d2 * sums.d2));
        let excess_kurtosis = raw_kurtosis - 3.0;

        let sorted = sorted_copy(samples);

        Ok(Self {
            sample_count: count,
            mean,
            variance,
            std_dev,
            skewness,
            excess_kurtosis,
            median: upper_median(&sorted),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    /// `(min, max)` of the sample set.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Sums of powers of deviations from the mean.
#[derive(Debug, Clone, Copy, Default)]
struct CentralSums {
    d2: f64,
    d3: f64,
    d4: f64,
}

impl CentralSums {
    fn accumulate(samples: &[f64], mean: f64) -> Self {
        samples.iter().fold(Self::default(), |acc, &x| {
            let d = x - mean;
            let d2 = d * d;
            Self {
                d2: acc.d2 + d2,
                d3: acc.d3 + d2 * d,
                d4: acc.d4 + d2 * d2,
            }
        })
    }
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Element at index `len / 2` of an ascending slice.
///
/// For even lengths this is the upper of the two middle elements; the two
/// are never averaged. Returns `NaN` for an empty slice.
pub fn upper_median(sorted: &[f64]) -> f64 {
    sorted.get(sorted.len() / 2).copied().unwrap_or(f64::NAN)
}

fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
