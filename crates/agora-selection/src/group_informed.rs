//! Group-informed strategy: common ground must hold in every opinion group,
//! and differences of opinion are measured group against rest.

use std::collections::BTreeMap;
use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::errors::{AgoraError, AgoraResult};
use agora_core::models::{Comment, RankedComment, VoteInfo};
use agora_core::traits::IScoringStrategy;
use agora_observability::selection_span;
use agora_stats::consensus::GroupConsensus;
use agora_stats::descriptive::decimal_to_percent;
use tracing::debug;

use crate::pool::{CommentPool, Scored};

/// Per-comment cross-group measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMetrics {
    pub consensus: f64,
    pub disagree_consensus: f64,
    pub min_agree_prob: f64,
    pub min_disagree_prob: f64,
    pub max_agree_prob_difference: f64,
    /// Group name → agree rate of that group minus agree rate of all others.
    pub agree_prob_differences: BTreeMap<String, f64>,
}

impl GroupMetrics {
    fn measure(comment: &Comment, info: &VoteInfo, as_estimate: bool) -> AgoraResult<Self> {
        let VoteInfo::Grouped(groups) = info else {
            debug!(comment_id = %comment.id, "group-informed scoring needs grouped votes");
            return Err(AgoraError::GroupDataRequired {
                metric: "group informed consensus",
            });
        };
        let metrics = if as_estimate {
            GroupConsensus::new(groups)
        } else {
            GroupConsensus::raw(groups)
        };
        let agree_prob_differences = groups
            .keys()
            .map(|name| Ok((name.clone(), metrics.agree_prob_difference(name)?)))
            .collect::<AgoraResult<BTreeMap<_, _>>>()?;
        Ok(Self {
            consensus: metrics.consensus()?,
            disagree_consensus: metrics.disagree_consensus()?,
            min_agree_prob: metrics.min_agree_prob()?,
            min_disagree_prob: metrics.min_disagree_prob()?,
            max_agree_prob_difference: metrics.max_agree_prob_difference()?,
            agree_prob_differences,
        })
    }
}

/// Ranks comments using per-group MAP estimates.
#[derive(Debug, Clone)]
pub struct GroupInformedStrategy {
    pool: CommentPool<GroupMetrics>,
}

impl GroupInformedStrategy {
    /// Filtered comments ranked by `score`, restricted to `filter`.
    pub fn top_k<S, F>(&self, score: S, k: usize, filter: F) -> Vec<RankedComment>
    where
        S: Fn(&Scored<GroupMetrics>) -> f64,
        F: Fn(&Scored<GroupMetrics>) -> bool,
    {
        self.pool.top_k(score, k, filter)
    }

    /// `max(consensus, disagree consensus)`.
    pub fn common_ground_score(entry: &Scored<GroupMetrics>) -> f64 {
        entry.metrics.consensus.max(entry.metrics.disagree_consensus)
    }

    pub fn difference_of_opinion_score(entry: &Scored<GroupMetrics>) -> f64 {
        entry.metrics.max_agree_prob_difference
    }

    fn meets_agree_threshold(&self, entry: &Scored<GroupMetrics>) -> bool {
        entry.metrics.min_agree_prob >= self.pool.thresholds().min_common_ground_prob
    }

    fn meets_disagree_threshold(&self, entry: &Scored<GroupMetrics>) -> bool {
        entry.metrics.min_disagree_prob >= self.pool.thresholds().min_common_ground_prob
    }

    /// Comments that `group` agrees with notably more than everyone else does,
    /// excluding anything that already counts as common ground.
    pub fn group_representative_comments(&self, group: &str, k: usize) -> Vec<RankedComment> {
        let gap = self.pool.thresholds().min_agree_prob_difference;
        let difference =
            |e: &Scored<GroupMetrics>| e.metrics.agree_prob_differences.get(group).copied();
        self.top_k(
            |e| difference(e).unwrap_or(f64::NEG_INFINITY),
            k,
            |e| !self.meets_agree_threshold(e) && difference(e).is_some_and(|d| d > gap),
        )
    }

    /// Every opinion group present in the filtered comments.
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .pool
            .filtered()
            .iter()
            .flat_map(|e| e.metrics.agree_prob_differences.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl IScoringStrategy for GroupInformedStrategy {
    const NAME: &'static str = "group_informed";

    fn default_thresholds() -> SelectionThresholds {
        SelectionThresholds::group_informed()
    }

    /// Fails with `GroupDataRequired` if a vote-eligible comment carries ungrouped votes.
    fn build(comments: Vec<Arc<Comment>>, thresholds: &SelectionThresholds) -> AgoraResult<Self> {
        let _span = selection_span!(Self::NAME, comments.len()).entered();
        let as_estimate = thresholds.as_probability_estimate;
        let pool = CommentPool::build(comments, thresholds, |comment, info| {
            GroupMetrics::measure(comment, info, as_estimate)
        })?;
        debug!(
            filtered = pool.filtered().len(),
            min_uncertainty_prob = pool.min_uncertainty_prob(),
            "group informed strategy ready"
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
        true
    }

    fn common_ground_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(Self::common_ground_score, k, |e| {
            self.meets_agree_threshold(e) || self.meets_disagree_threshold(e)
        })
    }

    fn common_ground_agree_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(|e| e.metrics.consensus, k, |e| self.meets_agree_threshold(e))
    }

    fn common_ground_disagree_comments(&self, k: usize) -> Vec<RankedComment> {
        self.top_k(
            |e| e.metrics.disagree_consensus,
            k,
            |e| self.meets_disagree_threshold(e),
        )
    }

    /// Some group must fall short of common ground, and some group must sit
    /// at least the configured gap away from the rest.
    fn difference_of_opinion_comments(&self, k: usize) -> Vec<RankedComment> {
        let gap = self.pool.thresholds().min_agree_prob_difference;
        self.top_k(Self::difference_of_opinion_score, k, |e| {
            !self.meets_agree_threshold(e) && e.metrics.max_agree_prob_difference >= gap
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
             ground (at least {} votes, and at least {} agreement across groups).",
            t.min_vote_count,
            decimal_to_percent(t.min_common_ground_prob)
        )
    }

    fn differences_of_opinion_no_comments_message(&self) -> String {
        let t = self.pool.thresholds();
        format!(
            "No statements met the thresholds necessary to be considered as a significant \
             difference of opinion (at least {} votes, and more than {} difference in agreement \
             rate between groups).",
            t.min_vote_count,
            decimal_to_percent(t.min_agree_prob_difference)
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
