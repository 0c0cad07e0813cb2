//! Dynamic uncertainty floor.
//!
//! Conversations where many people pass get a higher bar for "uncertain":
//! the floor rises to the 75th percentile of filtered pass rates whenever
//! that percentile is above the static floor.

use agora_core::constants::UNCERTAINTY_PERCENTILE;
use agora_stats::descriptive;
use agora_stats::StatsResult;

/// `max(base, p75(pass_rates))`; `base` when there are no pass rates.
pub fn uncertainty_floor(pass_rates: &[f64], base: f64) -> StatsResult<f64> {
    let top_quartile = descriptive::percentile(pass_rates, UNCERTAINTY_PERCENTILE)?;
    Ok(top_quartile.map_or(base, |p| p.max(base)))
}
