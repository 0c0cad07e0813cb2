//! Turning raw agree/disagree/pass events into model ratings.
//!
//! [`RatingIndex`] assigns dense row indices to voter and comment ids, so
//! no row is allocated for an id that never voted or was never voted on.

use std::collections::{BTreeSet, HashMap};

use agora_core::errors::FactorizationError;
use agora_core::models::Rating;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::FactorizationResult;

pub const AGREE: i8 = 1;
pub const PASS: i8 = 0;
pub const DISAGREE: i8 = -1;

/// One participant's vote on one comment: `1` agree, `0` pass, `-1` disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteEvent {
    pub voter_id: String,
    pub comment_id: String,
    pub vote: i8,
}

impl VoteEvent {
    pub fn new(voter_id: impl Into<String>, comment_id: impl Into<String>, vote: i8) -> Self {
        Self {
            voter_id: voter_id.into(),
            comment_id: comment_id.into(),
            vote,
        }
    }

    fn validate(&self) -> FactorizationResult<()> {
        match self.vote {
            AGREE | PASS | DISAGREE => Ok(()),
            other => Err(FactorizationError::InvalidVote {
                voter_id: self.voter_id.clone(),
                comment_id: self.comment_id.clone(),
                vote: i64::from(other),
            }),
        }
    }
}

/// How a vote becomes a rating value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingEncoding {
    /// The vote itself: -1, 0 or 1.
    Verbatim,
    /// 1 for agree, 0 for pass or disagree.
    Agree,
    /// 1 for pass, 0 otherwise. Useful for locating uncertainty.
    Pass,
}

impl RatingEncoding {
    pub fn encode(self, vote: i8) -> f64 {
        match self {
            Self::Verbatim => f64::from(vote),
            Self::Agree => f64::from(u8::from(vote == AGREE)),
            Self::Pass => f64::from(u8::from(vote == PASS)),
        }
    }
}

/// Dense row indices for voter and comment ids.
///
/// Ids are sorted numerically when every id parses as an integer, and
/// lexicographically otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingIndex {
    voter_ids: Vec<String>,
    comment_ids: Vec<String>,
    voter_rows: HashMap<String, usize>,
    comment_rows: HashMap<String, usize>,
}

impl RatingIndex {
    pub fn from_events(events: &[VoteEvent]) -> Self {
        let voter_ids = sorted_ids(events.iter().map(|e| e.voter_id.as_str()));
        let comment_ids = sorted_ids(events.iter().map(|e| e.comment_id.as_str()));
        debug!(
            voters = voter_ids.len(),
            comments = comment_ids.len(),
            "rating index built"
        );
        Self {
            voter_rows: rows(&voter_ids),
            comment_rows: rows(&comment_ids),
            voter_ids,
            comment_ids,
        }
    }

    pub fn voter_ids(&self) -> &[String] {
        &self.voter_ids
    }

    /// Comment ids in row order.
    pub fn comment_ids(&self) -> &[String] {
        &self.comment_ids
    }

    pub fn voter_row(&self, voter_id: &str) -> Option<usize> {
        self.voter_rows.get(voter_id).copied()
    }

    pub fn comment_row(&self, comment_id: &str) -> Option<usize> {
        self.comment_rows.get(comment_id).copied()
    }

    /// Encode `events` as ratings over this index's rows.
    ///
    /// Fails on any vote outside {-1, 0, 1}. Events whose ids are not in the
    /// index are skipped.
    pub fn ratings(
        &self,
        events: &[VoteEvent],
        encoding: RatingEncoding,
    ) -> FactorizationResult<Vec<Rating>> {
        let mut ratings = Vec::with_capacity(events.len());
        for event in events {
            event.validate()?;
            let (Some(user), Some(note)) = (
                self.voter_row(&event.voter_id),
                self.comment_row(&event.comment_id),
            ) else {
                debug!(
                    voter_id = %event.voter_id,
                    comment_id = %event.comment_id,
                    "vote outside index, skipping"
                );
                continue;
            };
            ratings.push(Rating::new(
                user as i64,
                note as i64,
                encoding.encode(event.vote),
            ));
        }
        Ok(ratings)
    }
}

fn sorted_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = ids.collect();
    let numeric: Option<Vec<(i64, &str)>> = distinct
        .iter()
        .map(|id| id.parse::<i64>().ok().map(|n| (n, *id)))
        .collect();
    match numeric {
        Some(mut pairs) => {
            pairs.sort();
            pairs.into_iter().map(|(_, id)| id.to_string()).collect()
        }
        None => distinct.into_iter().map(str::to_string).collect(),
    }
}

fn rows(ids: &[String]) -> HashMap<String, usize> {
    ids.iter()
        .enumerate()
        .map(|(row, id)| (id.clone(), row))
        .collect()
}

/// Pair each comment id with its helpfulness score, in row order.
///
/// Rows beyond the end of `scores` are omitted.
pub fn helpfulness_by_comment(index: &RatingIndex, scores: &[f64]) -> Vec<(String, f64)> {
    index
        .comment_ids()
        .iter()
        .zip(scores)
        .map(|(id, score)| (id.clone(), *score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_sort_numerically() {
        let ids = sorted_ids(["10", "2", "1", "2"].into_iter());
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn mixed_ids_sort_lexicographically() {
        let ids = sorted_ids(["b", "10", "a", "2"].into_iter());
        assert_eq!(ids, vec!["10", "2", "a", "b"]);
    }

    #[test]
    fn encodings() {
        assert_eq!(RatingEncoding::Verbatim.encode(DISAGREE), -1.0);
        assert_eq!(RatingEncoding::Agree.encode(AGREE), 1.0);
        assert_eq!(RatingEncoding::Agree.encode(PASS), 0.0);
        assert_eq!(RatingEncoding::Agree.encode(DISAGREE), 0.0);
        assert_eq!(RatingEncoding::Pass.encode(PASS), 1.0);
        assert_eq!(RatingEncoding::Pass.encode(AGREE), 0.0);
    }
}
