//! Descriptive statistics over plain value slices.

use survey_model::{NumericField, NumericSummary};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentile of sorted values with linear interpolation between ranks.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (pct / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn summarize(field: NumericField, values: &[f64]) -> NumericSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    NumericSummary {
        field,
        count: values.len(),
        mean: mean(values),
        median: percentile(&sorted, 50.0),
        std_dev: population_std_dev(values),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        p25: percentile(&sorted, 25.0),
        p75: percentile(&sorted, 75.0),
    }
}
