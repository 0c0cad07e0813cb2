//! Describes each topic node's engagement and alignment relative to every
//! other node in the same tree.

use std::fmt;

use agora_core::errors::AgoraResult;
use agora_core::traits::IScoringStrategy;
use agora_observability::relative_context_span;
use agora_stats::aggregate;
use agora_stats::descriptive::{mean, sample_std_dev};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tree::TopicStats;

/// Where a value sits against the population mean ± one standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeLevel {
    High,
    Average,
    Low,
}

impl RelativeLevel {
    /// Strictly above `mean + sd` is high, strictly below `mean − sd` is low.
    pub fn classify(value: f64, mean: f64, std_dev: f64) -> Self {
        if value > mean + std_dev {
            Self::High
        } else if value < mean - std_dev {
            Self::Low
        } else {
            Self::Average
        }
    }

    fn adjective(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Average => "moderate",
            Self::Low => "low",
        }
    }

    pub fn engagement_descriptor(self) -> String {
        format!("{} engagement", self.adjective())
    }

    pub fn alignment_descriptor(self) -> String {
        format!("{} alignment", self.adjective())
    }
}

impl fmt::Display for RelativeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.adjective())
    }
}

/// Population statistics over every node of a topic tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeContext {
    pub average_high_agree_rate: f64,
    pub high_agree_std_deviation: f64,
    pub average_engagement: f64,
    pub engagement_std_deviation: f64,
    pub max_vote_count: u64,
    pub max_comment_count: usize,
}

impl RelativeContext {
    /// Compute statistics over `topics` and all of their nested subtopics.
    pub fn new<S: IScoringStrategy>(topics: &[TopicStats<S>]) -> AgoraResult<Self> {
        let nodes: Vec<&TopicStats<S>> = topics.iter().flat_map(|t| t.nodes()).collect();
        let _span = relative_context_span!(nodes.len()).entered();

        let max_vote_count = nodes.iter().map(|n| n.vote_count()).max().unwrap_or(0);
        let max_comment_count = nodes.iter().map(|n| n.comment_count).max().unwrap_or(0);

        let agree_rates = nodes
            .iter()
            .map(|n| high_agreement_rate(n))
            .collect::<AgoraResult<Vec<f64>>>()?;

        let mut context = Self {
            average_high_agree_rate: mean(&agree_rates),
            high_agree_std_deviation: sample_std_dev(&agree_rates),
            average_engagement: 0.0,
            engagement_std_deviation: 0.0,
            max_vote_count,
            max_comment_count,
        };
        let engagement: Vec<f64> = nodes.iter().map(|n| context.engagement(n)).collect();
        context.average_engagement = mean(&engagement);
        context.engagement_std_deviation = sample_std_dev(&engagement);

        debug!(
            nodes = nodes.len(),
            average_high_agree_rate = context.average_high_agree_rate,
            average_engagement = context.average_engagement,
            "relative context computed"
        );
        Ok(context)
    }

    /// Normalized votes plus normalized comments, in `[0, 2]`.
    pub fn engagement<S: IScoringStrategy>(&self, node: &TopicStats<S>) -> f64 {
        normalized(node.vote_count() as f64, self.max_vote_count as f64)
            + normalized(node.comment_count as f64, self.max_comment_count as f64)
    }

    pub fn engagement_level<S: IScoringStrategy>(&self, node: &TopicStats<S>) -> RelativeLevel {
        RelativeLevel::classify(
            self.engagement(node),
            self.average_engagement,
            self.engagement_std_deviation,
        )
    }

    pub fn alignment_level<S: IScoringStrategy>(
        &self,
        node: &TopicStats<S>,
    ) -> AgoraResult<RelativeLevel> {
        Ok(RelativeLevel::classify(
            high_agreement_rate(node)?,
            self.average_high_agree_rate,
            self.high_agree_std_deviation,
        ))
    }

    /// e.g. `"high engagement"`.
    pub fn relative_engagement<S: IScoringStrategy>(&self, node: &TopicStats<S>) -> String {
        self.engagement_level(node).engagement_descriptor()
    }

    /// e.g. `"low alignment"`.
    pub fn relative_alignment<S: IScoringStrategy>(
        &self,
        node: &TopicStats<S>,
    ) -> AgoraResult<String> {
        Ok(self.alignment_level(node)?.alignment_descriptor())
    }
}

fn normalized(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// Mean of `max(agree, disagree)` over a node's filtered comments, using
/// pooled MAP estimates. 0 for a node with no eligible comments.
pub fn high_agreement_rate<S: IScoringStrategy>(node: &TopicStats<S>) -> AgoraResult<f64> {
    let include_passes = node.strategy.thresholds().include_passes;
    let rates = node
        .strategy
        .filtered_comments()
        .iter()
        .filter_map(|c| c.vote_info.as_ref())
        .map(|info| Ok(aggregate::total_rates(info, include_passes, true)?.high_agreement()))
        .collect::<AgoraResult<Vec<f64>>>()?;
    Ok(mean(&rates))
}
