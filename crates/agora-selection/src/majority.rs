//! Majority-vote strategy: pooled rates only, no opinion groups.

use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::errors::AgoraResult;
use agora_core::models::{Comment, RankedComment};
use agora_core::traits::IScoringStrategy;
use agora_observability::selection_span;
use agora_stats::descriptive::decimal_to_percent;
use tracing::debug;

use crate::pool::{CommentPool, Scored};

/// Ranks comments by pooled agree/disagree/pass rates.
#[derive(Debug, Clone)]
pub struct MajorityVoteStrategy {
    pool: CommentPool<()>,
}

impl MajorityVoteStrategy {
    /// Filtered comments ranked by `score`, restricted to `filter`.
    pub fn top_k<S, F>(&self, score: S, k: usize, filter: F) -> Vec<RankedComment>
    where
        S: Fn(&Scored<()>) -> f64,
        F: Fn(&Scored<()>) -> bool,
    {
        self.pool.top_k(score, k, filter)
    }

    /// `max(agree, disagree)`.
    pub fn common_ground_score(entry: &Scored<()>) -> f64 {
        entry.rates.high_agreement()
    }

    /// `1 − |agree − disagree| − pass`: highest when the room splits evenly
    /// and few people pass.
    pub fn difference_of_opinion_score(entry: &Scored<()>) -> f64 {
        1.0 - (entry.rates.agree - entry.rates.disagree).abs() - entry.rates.pass
    }

    fn meets_agree_threshold(&self, entry: &Scored<()>) -> bool {
        entry.rates.agree >= self.pool.thresholds().min_common_ground_prob
    }

    fn meets_disagree_threshold(&self, entry: &Scored<()>) -> bool {
        entry.rates.disagree >= self.pool.thresholds().min_common_ground_prob
    }

    fn in_difference_band(&self, rate: f64) -> bool {
        let t = self.pool.thresholds();
        (t.min_difference_prob..=t.max_difference_prob).contains(&rate)
    }
}

impl IScoringStrategy for MajorityVoteStrategy {
    const NAME: &'static str = "majority_vote";

    fn default_thresholds() -> SelectionThresholds {
        SelectionThresholds::majority_vote()
    }

    fn build(comments: Vec<Arc<Comment>>, thresholds: &SelectionThresholds) -> AgoraResult<Self> {
        let _span = selection_span!(Self::NAME, comments.len()).entered();
        let pool = CommentPool::build(comments, thresholds, |_, _| Ok(()))?;
        debug!(
            filtered = pool.filtered().len(),
            min_uncertainty_prob = pool.min_uncertainty_prob(),
            "majority vote strategy ready"
        );
        Ok(Self { pool })
    }

    fn comments(&self) -> &[Arc<Comment>] {
        self.pool.comments()
    }

    fn filtered_comments(&self) -> &[Arc<Comment>] {
        self.pool.filtered_comments()
    }

    fn thresholds(&self) -> &SelectionThresholds {
        self.pool.thresholds()
    }

    fn min_uncertainty_prob(&self) -> f64 {
        self.pool.min_uncertainty_prob()
    }

    fn is_group_based(&self) -> bool {
        false
    }

    fn common_ground_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(Self::common_ground_score, k, |e| {
            self.meets_agree_threshold(e) || self.meets_disagree_threshold(e)
        })
    }

    fn common_ground_agree_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(|e| e.rates.agree, k, |e| self.meets_agree_threshold(e))
    }

    fn common_ground_disagree_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(|e| e.rates.disagree, k, |e| self.meets_disagree_threshold(e))
    }

    fn difference_of_opinion_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(Self::difference_of_opinion_score, k, |e| {
            self.in_difference_band(e.rates.agree) && self.in_difference_band(e.rates.disagree)
        })
    }

    fn uncertain_comments(&self, k: usize) -> Vec<RankedComment> {
        let floor = self.pool.min_uncertainty_prob();
        self.top_k(|e| e.rates.pass, k, |e| e.rates.pass > floor)
    }

    fn common_ground_no_comments_message(&self) -> String {
        let t = self.pool.thresholds();
        format!(
            "No statements met the thresholds necessary to be considered as a point of common \
             ground (at least {} votes, and at least {} agreement).",
            t.min_vote_count,
            decimal_to_percent(t.min_common_ground_prob)
        )
    }

    fn differences_of_opinion_no_comments_message(&self) -> String {
        let t = self.pool.thresholds();
        format!(
            "No statements met the thresholds necessary to be considered as a significant \
             difference of opinion (at least {} votes, and both an agreement rate and disagree \
             rate between {} and {}).",
            t.min_vote_count,
            decimal_to_percent(t.min_difference_prob),
            decimal_to_percent(t.max_difference_prob)
        )
    }

    fn uncertainty_no_comments_message(&self) -> String {
        format!(
            "No statements met the thresholds necessary to be considered as an area of \
             uncertainty (at least {} votes, and more than {} pass votes).",
            self.pool.thresholds().min_vote_count,
            decimal_to_percent(self.pool.min_uncertainty_prob())
        )
    }
}
