//! Cross-group consensus metrics.
//!
//! Every metric needs per-group tallies. The `Comment`-level functions fail
//! with [`AgoraError::GroupDataRequired`] on ungrouped vote data instead of
//! falling back to the pooled rate.

use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{Comment, GroupVoteTallies, VoteInfo, VoteTally};

use crate::estimator;

/// Consensus metrics over one comment's per-group tallies.
///
/// Group rates always count passes in the denominator.
#[derive(Debug, Clone, Copy)]
pub struct GroupConsensus<'a> {
    groups: &'a GroupVoteTallies,
    as_estimate: bool,
}

impl<'a> GroupConsensus<'a> {
    /// Metrics using MAP estimates.
    pub fn new(groups: &'a GroupVoteTallies) -> Self {
        Self {
            groups,
            as_estimate: true,
        }
    }

    /// Metrics using plain ratios. Empty groups make rates fail.
    pub fn raw(groups: &'a GroupVoteTallies) -> Self {
        Self {
            groups,
            as_estimate: false,
        }
    }

    /// Borrow a comment's grouped tallies, failing on any other shape.
    pub fn require(comment: &'a Comment, metric: &'static str) -> AgoraResult<Self> {
        match &comment.vote_info {
            Some(VoteInfo::Grouped(groups)) => Ok(Self::new(groups)),
            Some(VoteInfo::Single(_)) | None => Err(AgoraError::GroupDataRequired { metric }),
        }
    }

    pub fn groups(&self) -> &'a GroupVoteTallies {
        self.groups
    }

    fn non_empty(&self) -> AgoraResult<()> {
        if self.groups.is_empty() {
            return Err(AgoraError::GroupDataRequired {
                metric: "a metric over zero opinion groups",
            });
        }
        Ok(())
    }

    fn agree(&self, tally: &VoteTally) -> AgoraResult<f64> {
        Ok(estimator::agree_rate(tally, true, self.as_estimate)?)
    }

    fn disagree(&self, tally: &VoteTally) -> AgoraResult<f64> {
        Ok(estimator::disagree_rate(tally, true, self.as_estimate)?)
    }

    /// Product of per-group agree rates. Low if any single group disagrees.
    pub fn consensus(&self) -> AgoraResult<f64> {
        self.groups
            .values()
            .try_fold(1.0, |product, tally| Ok(product * self.agree(tally)?))
    }

    /// Product of per-group disagree rates.
    pub fn disagree_consensus(&self) -> AgoraResult<f64> {
        self.groups
            .values()
            .try_fold(1.0, |product, tally| Ok(product * self.disagree(tally)?))
    }

    /// Agree rate of the least-agreeing group.
    pub fn min_agree_prob(&self) -> AgoraResult<f64> {
        self.non_empty()?;
        self.groups
            .values()
            .try_fold(f64::INFINITY, |min, tally| Ok(min.min(self.agree(tally)?)))
    }

    /// Disagree rate of the least-disagreeing group.
    pub fn min_disagree_prob(&self) -> AgoraResult<f64> {
        self.non_empty()?;
        self.groups
            .values()
            .try_fold(f64::INFINITY, |min, tally| Ok(min.min(self.disagree(tally)?)))
    }

    /// `agree(group) − agree(every other group pooled)`.
    ///
    /// Positive when the group agrees more than the rest of the conversation.
    pub fn agree_prob_difference(&self, group: &str) -> AgoraResult<f64> {
        let tally = self
            .groups
            .get(group)
            .ok_or_else(|| AgoraError::UnknownGroup {
                group: group.to_string(),
            })?;
        let rest: VoteTally = self
            .groups
            .iter()
            .filter(|(name, _)| name.as_str() != group)
            .map(|(_, t)| *t)
            .sum();
        Ok(self.agree(tally)? - self.agree(&rest)?)
    }

    /// Largest absolute [`agree_prob_difference`](Self::agree_prob_difference) over all groups.
    pub fn max_agree_prob_difference(&self) -> AgoraResult<f64> {
        self.non_empty()?;
        self.groups.keys().try_fold(f64::NEG_INFINITY, |max, name| {
            Ok(max.max(self.agree_prob_difference(name)?.abs()))
        })
    }
}

pub fn group_informed_consensus(comment: &Comment) -> AgoraResult<f64> {
    GroupConsensus::require(comment, "group informed consensus")?.consensus()
}

pub fn group_informed_disagree_consensus(comment: &Comment) -> AgoraResult<f64> {
    GroupConsensus::require(comment, "group informed disagree consensus")?.disagree_consensus()
}

pub fn min_agree_prob(comment: &Comment) -> AgoraResult<f64> {
    GroupConsensus::require(comment, "minimum agree probability")?.min_agree_prob()
}

pub fn min_disagree_prob(comment: &Comment) -> AgoraResult<f64> {
    GroupConsensus::require(comment, "minimum disagree probability")?.min_disagree_prob()
}

pub fn group_agree_prob_difference(comment: &Comment, group: &str) -> AgoraResult<f64> {
    GroupConsensus::require(comment, "group agree probability difference")?
        .agree_prob_difference(group)
}

pub fn max_group_agree_prob_difference(comment: &Comment) -> AgoraResult<f64> {
    GroupConsensus::require(comment, "maximum group agree probability difference")?
        .max_agree_prob_difference()
}
