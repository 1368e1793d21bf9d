//! Descriptive statistics over a sample series
//!
//! Conventions (fixed so fixtures are reproducible):
//! - missing readings (`None` or NaN) are dropped first
//! - stddev is the population form (divide by n)
//! - skewness is the biased Fisher-Pearson g1 = m3 / m2^(3/2),
//!   reported as 0 for fewer than 3 samples or zero variance
//! - quartiles use linear interpolation between order statistics (type 7)
//! - mode ties go to the value seen first in input order

use crate::error::StatsError;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Full summary of one non-empty series.
///
/// Serializes with the report's wire keys, in wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    #[serde(rename = "moda")]
    pub mode: f64,
    #[serde(rename = "mediana")]
    pub median: f64,
    #[serde(rename = "media")]
    pub mean: f64,
    #[serde(rename = "sesgo")]
    pub skewness: f64,
    #[serde(rename = "desviacion_estandar")]
    pub stddev: f64,
    #[serde(rename = "maximo")]
    pub max: f64,
    #[serde(rename = "minimo")]
    pub min: f64,
    pub count: usize,
    pub q1: f64,
    pub q3: f64,
}

/// Outcome of summarizing a series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSummary {
    /// No valid readings after dropping missing entries.
    Empty,
    Stats(StatisticsSummary),
}

impl SeriesSummary {
    pub fn stats(&self) -> Option<&StatisticsSummary> {
        match self {
            SeriesSummary::Stats(s) => Some(s),
            SeriesSummary::Empty => None,
        }
    }
}

/// Keep readings that are present and not NaN, preserving order.
pub fn valid_values(series: &[Option<f64>]) -> Vec<f64> {
    series
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect()
}

/// Summarize a series.
///
/// Returns `Ok(SeriesSummary::Empty)` when nothing survives the missing-value
/// filter and `Err` when any statistic is not finite.
pub fn summarize(series: &[Option<f64>]) -> Result<SeriesSummary, StatsError> {
    let values = valid_values(series);
    if values.is_empty() {
        return Ok(SeriesSummary::Empty);
    }
    summarize_values(&values).map(SeriesSummary::Stats)
}

/// Median of the valid readings, `Ok(None)` if there are none.
pub fn median(series: &[Option<f64>]) -> Result<Option<f64>, StatsError> {
    let mut values = valid_values(series);
    if values.is_empty() {
        return Ok(None);
    }
    values.sort_by(f64::total_cmp);
    finite("median", median_sorted(&values)).map(Some)
}

/// Summarize values that are already free of missing entries.
pub fn summarize_values(values: &[f64]) -> Result<StatisticsSummary, StatsError> {
    debug_assert!(!values.is_empty());

    let count = values.len();
    let n = count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = finite("mean", values.iter().sum::<f64>() / n)?;

    let m2 = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    let stddev = finite("stddev", m2.sqrt())?;
    let skewness = if count < 3 || m2 == 0.0 {
        0.0
    } else {
        // Standardized third moment; cubing raw deviations underflows for tiny scales
        let g1 = values
            .iter()
            .map(|v| {
                let z = (v - mean) / stddev;
                z * z * z
            })
            .sum::<f64>()
            / n;
        finite("skewness", g1)?
    };

    Ok(StatisticsSummary {
        mode: finite("mode", mode(values))?,
        median: finite("median", median_sorted(&sorted))?,
        mean,
        skewness,
        stddev,
        min: finite("min", sorted[0])?,
        max: finite("max", sorted[count - 1])?,
        q1: finite("q1", quantile_sorted(&sorted, 0.25))?,
        q3: finite("q3", quantile_sorted(&sorted, 0.75))?,
        count,
    })
}

fn finite(statistic: &'static str, value: f64) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::NonFinite { statistic })
    }
}

/// Most frequent value; ties resolved by first occurrence.
///
/// Values are keyed by bit pattern with -0.0 folded into 0.0.
pub fn mode(values: &[f64]) -> f64 {
    // bits -> (occurrences, first index)
    let mut counts: FxHashMap<u64, (usize, usize)> = FxHashMap::default();
    for (idx, v) in values.iter().enumerate() {
        let key = if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        counts.entry(key).or_insert((0, idx)).0 += 1;
    }

    let mut best: Option<(usize, usize)> = None;
    for &(count, first) in counts.values() {
        best = match best {
            Some((c, f)) if c > count || (c == count && f < first) => Some((c, f)),
            _ => Some((count, first)),
        };
    }

    best.map(|(_, first)| values[first]).unwrap_or(f64::NAN)
}

/// Median of sorted values.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        let (lo, hi) = (sorted[n / 2 - 1], sorted[n / 2]);
        lo + (hi - lo) / 2.0
    }
}

/// Type-7 quantile of sorted values: h = (n - 1) p, interpolate between
/// floor(h) and floor(h) + 1.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn stats(values: &[f64]) -> StatisticsSummary {
        match summarize(&some(values)).unwrap() {
            SeriesSummary::Stats(s) => s,
            SeriesSummary::Empty => panic!("expected statistics"),
        }
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(summarize(&[]).unwrap(), SeriesSummary::Empty);
        assert_eq!(summarize(&[None, None]).unwrap(), SeriesSummary::Empty);
        assert_eq!(summarize(&[Some(f64::NAN)]).unwrap(), SeriesSummary::Empty);
        assert_eq!(median(&[None]).unwrap(), None);
    }

    #[test]
    fn test_single_value() {
        let s = stats(&[4.0]);
        assert_eq!(s.mode, 4.0);
        assert_eq!(s.median, 4.0);
        assert_eq!(s.mean, 4.0);
        assert_eq!(s.count, 1);
        assert_eq!(s.stddev, 0.0);
        assert_eq!(s.skewness, 0.0);
        assert_eq!(s.q1, 4.0);
        assert_eq!(s.q3, 4.0);
    }

    #[test]
    fn test_repeated_value_is_mode() {
        let s = stats(&[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(s.mode, 2.0);
        assert_eq!(s.median, 2.0);
        assert_eq!(s.mean, 2.0);
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        // population variance = (1 + 0 + 0 + 1) / 4
        assert_relative_eq!(s.stddev, 0.5f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(s.skewness, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.q1, 1.75, epsilon = 1e-12);
        assert_relative_eq!(s.q3, 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_without_repeats_is_first_in_input_order() {
        assert_eq!(stats(&[1.0, 2.0, 3.0]).mode, 1.0);
        assert_eq!(stats(&[3.0, 1.0, 2.0]).mode, 3.0);
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        // 5.0 and 1.0 both appear twice; 5.0 appears first
        assert_eq!(mode(&[5.0, 1.0, 1.0, 5.0, 3.0]), 5.0);
        assert_eq!(mode(&[1.0, 5.0, 5.0, 1.0, 3.0]), 1.0);
        // Higher count wins regardless of position
        assert_eq!(mode(&[9.0, 1.0, 1.0, 1.0, 9.0]), 1.0);
        assert_eq!(mode(&[-0.0, 0.0, 2.0]), -0.0);
    }

    #[test]
    fn test_missing_entries_are_dropped_before_counting() {
        let s = match summarize(&[None, Some(3.0), Some(f64::NAN), Some(1.0), None]).unwrap() {
            SeriesSummary::Stats(s) => s,
            SeriesSummary::Empty => panic!("expected statistics"),
        };
        assert_eq!(s.count, 2);
        assert_eq!(s.mode, 3.0);
        assert_eq!(s.median, 2.0);
    }

    #[test]
    fn test_even_median_and_quartiles() {
        let s = stats(&[7.0, 1.0, 3.0, 5.0]);
        assert_eq!(s.median, 4.0);
        // sorted [1, 3, 5, 7]: h(0.25) = 0.75, h(0.75) = 2.25
        assert_relative_eq!(s.q1, 2.5, epsilon = 1e-12);
        assert_relative_eq!(s.q3, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_population_stddev_and_biased_skewness() {
        let s = stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(s.mean, 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.stddev, 2.0, epsilon = 1e-12);
        // m3 = (-27 - 1 - 1 - 1 + 0 + 0 + 8 + 64) / 8 = 5.25, g1 = 5.25 / 8
        assert_relative_eq!(s.skewness, 0.65625, epsilon = 1e-12);
        assert_eq!(s.mode, 4.0);
    }

    #[test]
    fn test_skewness_sign_and_small_samples() {
        assert!(stats(&[1.0, 1.0, 1.0, 10.0]).skewness > 0.0);
        assert!(stats(&[10.0, 10.0, 10.0, 1.0]).skewness < 0.0);
        assert_eq!(stats(&[1.0, 10.0]).skewness, 0.0);
        assert_eq!(stats(&[3.0, 3.0, 3.0]).skewness, 0.0);
        assert_eq!(stats(&[3.0, 3.0, 3.0]).stddev, 0.0);
    }

    #[test]
    fn test_skewness_is_scale_invariant_for_tiny_readings() {
        // [1, 2, 4]: m2 = 42/27, m3 = 20/27, g1 ~ 0.3818
        let unit = stats(&[1.0, 2.0, 4.0]);
        assert_relative_eq!(unit.skewness, 0.381801774160606, epsilon = 1e-9);

        let tiny = stats(&[1e-110, 2e-110, 4e-110]);
        assert_relative_eq!(tiny.skewness, unit.skewness, max_relative = 1e-9);
    }

    #[test]
    fn test_median_of_extreme_values_does_not_overflow() {
        assert_eq!(median(&some(&[f64::MAX, f64::MAX])).unwrap(), Some(f64::MAX));
        assert_eq!(median_sorted(&[f64::MAX / 2.0, f64::MAX]), f64::MAX * 0.75);
    }

    #[test]
    fn test_infinite_reading_is_a_computation_failure() {
        let err = summarize(&[Some(1.0), Some(f64::INFINITY)]).unwrap_err();
        assert_eq!(err, StatsError::NonFinite { statistic: "mean" });

        let err = summarize(&[Some(f64::MAX), Some(f64::MAX)]).unwrap_err();
        assert!(matches!(err, StatsError::NonFinite { .. }));
    }

    #[test]
    fn test_summaries_are_bit_identical_across_calls() {
        let series = some(&[0.1, 0.7, 0.3, 0.3, 12.5, 0.2, 4.4]);
        let a = summarize(&series).unwrap();
        let b = summarize(&series).unwrap();
        let (a, b) = (a.stats().unwrap(), b.stats().unwrap());
        for (x, y) in [
            (a.mode, b.mode), (a.median, b.median), (a.mean, b.mean),
            (a.skewness, b.skewness), (a.stddev, b.stddev),
            (a.q1, b.q1), (a.q3, b.q3),
        ] {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_median_helper() {
        assert_eq!(median(&some(&[5.0, 1.0, 3.0])).unwrap(), Some(3.0));
        assert_eq!(median(&[Some(2.0), None, Some(4.0)]).unwrap(), Some(3.0));
        assert!(median(&[Some(f64::INFINITY)]).is_err());
    }
}
