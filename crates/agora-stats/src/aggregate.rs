//! Rates over either shape of vote data.
//!
//! Grouped tallies are summed into one pooled tally before the prior is
//! applied, so the +1/+2 pseudo-counts enter once, not once per group.

use agora_core::models::{Comment, VoteInfo, VoteTally};

use crate::estimator::{self, VoteRates};
use crate::StatsResult;

/// One tally covering every vote in `info`.
pub fn pooled_tally(info: &VoteInfo) -> VoteTally {
    match info {
        VoteInfo::Single(tally) => *tally,
        VoteInfo::Grouped(groups) => groups.values().copied().sum(),
    }
}

pub fn total_agree_rate(
    info: &VoteInfo,
    include_passes: bool,
    as_estimate: bool,
) -> StatsResult<f64> {
    estimator::agree_rate(&pooled_tally(info), include_passes, as_estimate)
}

pub fn total_disagree_rate(
    info: &VoteInfo,
    include_passes: bool,
    as_estimate: bool,
) -> StatsResult<f64> {
    estimator::disagree_rate(&pooled_tally(info), include_passes, as_estimate)
}

pub fn total_pass_rate(info: &VoteInfo, as_estimate: bool) -> StatsResult<f64> {
    estimator::pass_rate(&pooled_tally(info), as_estimate)
}

/// Pooled agree, disagree and pass rates.
pub fn total_rates(
    info: &VoteInfo,
    include_passes: bool,
    as_estimate: bool,
) -> StatsResult<VoteRates> {
    estimator::rates(&pooled_tally(info), include_passes, as_estimate)
}

/// Total votes on a comment across all groups. Votes from participants outside
/// every opinion group are not represented in grouped data and so not counted.
pub fn comment_vote_count(comment: &Comment, include_passes: bool) -> u64 {
    comment.vote_count(include_passes)
}
