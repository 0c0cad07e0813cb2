//! The comment subset a strategy scores, with per-comment measurements
//! computed once at construction.

use std::cmp::Ordering;
use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::errors::{AgoraError, AgoraResult, StatsError};
use agora_core::models::{Comment, RankedComment, VoteInfo};
use agora_stats::aggregate;
use agora_stats::estimator::VoteRates;
use tracing::{debug, warn};

use crate::uncertainty;

/// A vote-eligible comment with its pooled rates and strategy-specific metrics.
#[derive(Debug, Clone)]
pub struct Scored<M> {
    pub comment: Arc<Comment>,
    pub rates: VoteRates,
    pub metrics: M,
}

/// Immutable comment subset shared by both strategies.
///
/// `comments` keeps every input comment. `filtered` keeps only those with vote
/// data and at least `min_vote_count` votes (passes included), ordered by id
/// so that equal scores rank deterministically.
#[derive(Debug, Clone)]
pub struct CommentPool<M> {
    comments: Vec<Arc<Comment>>,
    filtered: Vec<Scored<M>>,
    filtered_comments: Vec<Arc<Comment>>,
    thresholds: SelectionThresholds,
    min_uncertainty_prob: f64,
}

impl<M> CommentPool<M> {
    /// Filter `comments` and measure each eligible one with `measure`.
    ///
    /// A raw-mode rate over zero votes drops that comment with a warning;
    /// any other measurement error aborts construction.
    pub fn build<F>(
        comments: Vec<Arc<Comment>>,
        thresholds: &SelectionThresholds,
        measure: F,
    ) -> AgoraResult<Self>
    where
        F: Fn(&Comment, &VoteInfo) -> AgoraResult<M>,
    {
        let mut eligible: Vec<&Arc<Comment>> = comments
            .iter()
            .filter(|c| {
                c.vote_info.is_some()
                    && aggregate::comment_vote_count(c, true) >= thresholds.min_vote_count
            })
            .collect();
        eligible.sort_by(|a, b| a.id.cmp(&b.id));

        let mut filtered = Vec::with_capacity(eligible.len());
        for comment in eligible {
            let Some(info) = comment.vote_info.as_ref() else {
                continue;
            };
            let measured = aggregate::total_rates(
                info,
                thresholds.include_passes,
                thresholds.as_probability_estimate,
            )
            .map_err(AgoraError::from)
            .and_then(|rates| Ok((rates, measure(comment, info)?)));

            match measured {
                Ok((rates, metrics)) => filtered.push(Scored {
                    comment: Arc::clone(comment),
                    rates,
                    metrics,
                }),
                Err(AgoraError::StatsError(StatsError::ZeroVoteTotal { rate })) => {
                    warn!(
                        comment_id = %comment.id,
                        rate,
                        "skipping comment with no votes for raw rate"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        let pass_rates: Vec<f64> = filtered.iter().map(|s| s.rates.pass).collect();
        let min_uncertainty_prob =
            uncertainty::uncertainty_floor(&pass_rates, thresholds.min_uncertainty_prob)?;
        if min_uncertainty_prob > thresholds.min_uncertainty_prob {
            debug!(
                base = thresholds.min_uncertainty_prob,
                raised = min_uncertainty_prob,
                "uncertainty floor raised to top-quartile pass rate"
            );
        }

        let filtered_comments = filtered.iter().map(|s| Arc::clone(&s.comment)).collect();
        Ok(Self {
            comments,
            filtered,
            filtered_comments,
            thresholds: thresholds.clone(),
            min_uncertainty_prob,
        })
    }

    pub fn comments(&self) -> &[Arc<Comment>] {
        &self.comments
    }

    pub fn filtered(&self) -> &[Scored<M>] {
        &self.filtered
    }

    pub fn filtered_comments(&self) -> &[Arc<Comment>] {
        &self.filtered_comments
    }

    pub fn thresholds(&self) -> &SelectionThresholds {
        &self.thresholds
    }

    pub fn min_uncertainty_prob(&self) -> f64 {
        self.min_uncertainty_prob
    }

    /// The `k` highest-scoring filtered comments that pass `filter`.
    ///
    /// Sorting is stable over id order, so ties keep ascending comment id.
    pub fn top_k<S, F>(&self, score: S, k: usize, filter: F) -> Vec<RankedComment>
    where
        S: Fn(&Scored<M>) -> f64,
        F: Fn(&Scored<M>) -> bool,
    {
        if k == 0 {
            return Vec::new();
        }
        let mut ranked: Vec<RankedComment> = self
            .filtered
            .iter()
            .filter(|s| filter(s))
            .map(|s| RankedComment {
                comment: Arc::clone(&s.comment),
                score: score(s),
            })
            .collect();
        ranked.sort_by(|a, b| descending(a.score, b.score));
        ranked.truncate(k);
        ranked
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
