//! Descriptive statistics over plain samples.

use agora_core::errors::StatsError;

use crate::StatsResult;

/// Arithmetic mean; 0.0 for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator); 0.0 for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// The `p`-th quantile of `values` (`p` in [0, 1]).
///
/// Uses index `(n − 1) · p` into the ascending values, interpolating linearly
/// between the two bracketing values when the index is fractional.
/// Returns `None` for an empty sample.
pub fn percentile(values: &[f64], p: f64) -> StatsResult<Option<f64>> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidPercentile { percentile: p });
    }
    if values.is_empty() {
        return Ok(None);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let index = (sorted.len() - 1) as f64 * p;
    let lower = index.floor() as usize;
    let fraction = index - lower as f64;
    if fraction == 0.0 || lower + 1 >= sorted.len() {
        return Ok(Some(sorted[lower]));
    }
    Ok(Some(
        sorted[lower] + (sorted[lower + 1] - sorted[lower]) * fraction,
    ))
}

/// Render a proportion as a whole-number percentage, e.g. `0.6` → `"60%"`.
pub fn decimal_to_percent(decimal: f64) -> String {
    format!("{}%", (decimal * 100.0).round())
}
