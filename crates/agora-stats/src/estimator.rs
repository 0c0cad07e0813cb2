use agora_core::constants::{PRIOR_DENOMINATOR, PRIOR_NUMERATOR};
use agora_core::errors::StatsError;
use agora_core::models::VoteTally;

use crate::StatsResult;

/// Agree, disagree and pass probabilities for one tally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteRates {
    pub agree: f64,
    pub disagree: f64,
    pub pass: f64,
}

impl VoteRates {
    /// The stronger of agreement and disagreement.
    pub fn high_agreement(&self) -> f64 {
        self.agree.max(self.disagree)
    }
}

/// `count / total`, or the MAP estimate `(count + 1) / (total + 2)`.
///
/// Raw mode on an empty total is an error rather than NaN.
fn ratio(count: u64, total: u64, as_estimate: bool, rate: &'static str) -> StatsResult<f64> {
    if as_estimate {
        return Ok((count as f64 + PRIOR_NUMERATOR) / (total as f64 + PRIOR_DENOMINATOR));
    }
    if total == 0 {
        return Err(StatsError::ZeroVoteTotal { rate });
    }
    Ok(count as f64 / total as f64)
}

/// Probability of an agree vote.
pub fn agree_rate(tally: &VoteTally, include_passes: bool, as_estimate: bool) -> StatsResult<f64> {
    ratio(
        tally.agree_count,
        tally.total_count(include_passes),
        as_estimate,
        "agree",
    )
}

/// Probability of a disagree vote.
pub fn disagree_rate(
    tally: &VoteTally,
    include_passes: bool,
    as_estimate: bool,
) -> StatsResult<f64> {
    ratio(
        tally.disagree_count,
        tally.total_count(include_passes),
        as_estimate,
        "disagree",
    )
}

/// Probability of a pass vote. The denominator always includes passes.
pub fn pass_rate(tally: &VoteTally, as_estimate: bool) -> StatsResult<f64> {
    ratio(tally.passes(), tally.total_count(true), as_estimate, "pass")
}

/// All three rates at once.
pub fn rates(tally: &VoteTally, include_passes: bool, as_estimate: bool) -> StatsResult<VoteRates> {
    Ok(VoteRates {
        agree: agree_rate(tally, include_passes, as_estimate)?,
        disagree: disagree_rate(tally, include_passes, as_estimate)?,
        pass: pass_rate(tally, as_estimate)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_on_mixed_tally() {
        let r = rates(&VoteTally::new(10, 5, 5), true, true).unwrap();
        assert_eq!(r.agree, 0.5);
        assert!((r.disagree - 6.0 / 22.0).abs() < 1e-12);
        assert!((r.pass - 6.0 / 22.0).abs() < 1e-12);
    }

    #[test]
    fn raw_without_passes() {
        let tally = VoteTally::new(6, 2, 12);
        assert_eq!(agree_rate(&tally, false, false).unwrap(), 0.75);
        assert_eq!(pass_rate(&tally, false).unwrap(), 0.6);
    }

    #[test]
    fn raw_empty_tally_is_an_error() {
        let err = agree_rate(&VoteTally::default(), true, false).unwrap_err();
        assert!(matches!(err, StatsError::ZeroVoteTotal { rate: "agree" }));
    }
}
