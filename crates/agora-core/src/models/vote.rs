use std::collections::BTreeMap;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Agree/disagree/pass counts for one comment, or for one opinion group on one comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub agree_count: u64,
    pub disagree_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_count: Option<u64>,
}

impl VoteTally {
    pub fn new(agree_count: u64, disagree_count: u64, pass_count: u64) -> Self {
        Self {
            agree_count,
            disagree_count,
            pass_count: Some(pass_count),
        }
    }

    /// A tally from a source that never recorded passes.
    pub fn without_passes(agree_count: u64, disagree_count: u64) -> Self {
        Self {
            agree_count,
            disagree_count,
            pass_count: None,
        }
    }

    /// Pass count, treating an unrecorded count as zero.
    pub fn passes(&self) -> u64 {
        self.pass_count.unwrap_or(0)
    }

    /// Total votes, optionally including passes.
    pub fn total_count(&self, include_passes: bool) -> u64 {
        let base = self.agree_count + self.disagree_count;
        if include_passes {
            base + self.passes()
        } else {
            base
        }
    }
}

impl Add for VoteTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let pass_count = match (self.pass_count, rhs.pass_count) {
            (None, None) => None,
            _ => Some(self.passes() + rhs.passes()),
        };
        Self {
            agree_count: self.agree_count + rhs.agree_count,
            disagree_count: self.disagree_count + rhs.disagree_count,
            pass_count,
        }
    }
}

impl std::iter::Sum for VoteTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(VoteTally::default(), |acc, t| acc + t)
    }
}

/// Per-opinion-group tallies, keyed by group name.
pub type GroupVoteTallies = BTreeMap<String, VoteTally>;

/// Vote data attached to a comment: a single tally, or one tally per opinion group.
///
/// Serialized untagged so either upstream JSON shape deserializes directly.
/// A single tally is tried first; it requires `agreeCount` and `disagreeCount` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoteInfo {
    Single(VoteTally),
    Grouped(GroupVoteTallies),
}

impl VoteInfo {
    /// Total votes across every group, optionally including passes.
    pub fn total_count(&self, include_passes: bool) -> u64 {
        match self {
            VoteInfo::Single(tally) => tally.total_count(include_passes),
            VoteInfo::Grouped(groups) => groups
                .values()
                .map(|tally| tally.total_count(include_passes))
                .sum(),
        }
    }

    /// The grouped tallies, if this is the grouped variant.
    pub fn as_grouped(&self) -> Option<&GroupVoteTallies> {
        match self {
            VoteInfo::Single(_) => None,
            VoteInfo::Grouped(groups) => Some(groups),
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, VoteInfo::Grouped(_))
    }
}

impl From<VoteTally> for VoteInfo {
    fn from(tally: VoteTally) -> Self {
        VoteInfo::Single(tally)
    }
}

impl From<GroupVoteTallies> for VoteInfo {
    fn from(groups: GroupVoteTallies) -> Self {
        VoteInfo::Grouped(groups)
    }
}
