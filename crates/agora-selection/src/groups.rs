//! Per-opinion-group vote totals.

use std::collections::BTreeMap;
use std::sync::Arc;

use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{Comment, GroupStats, VoteInfo};

/// Total votes (passes included) cast by each opinion group across `comments`,
/// ordered by group name.
///
/// Comments without vote data are skipped. Ungrouped vote data fails with
/// `GroupDataRequired`.
pub fn stats_by_group(comments: &[Arc<Comment>]) -> AgoraResult<Vec<GroupStats>> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for comment in comments {
        match &comment.vote_info {
            None => continue,
            Some(VoteInfo::Single(_)) => {
                return Err(AgoraError::GroupDataRequired {
                    metric: "stats by group",
                })
            }
            Some(VoteInfo::Grouped(groups)) => {
                for (name, tally) in groups {
                    *totals.entry(name.as_str()).or_default() += tally.total_count(true);
                }
            }
        }
    }
    Ok(totals
        .into_iter()
        .map(|(name, vote_count)| GroupStats {
            name: name.to_string(),
            vote_count,
        })
        .collect())
}
