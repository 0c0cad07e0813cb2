//! Serializable projection of a topic tree.

use agora_core::errors::AgoraResult;
use agora_core::traits::IScoringStrategy;
use serde::{Deserialize, Serialize};

use crate::relative_context::RelativeContext;
use crate::tree::TopicStats;

/// Public numbers for one topic node; the scoring strategy stays behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub name: String,
    pub comment_count: usize,
    pub vote_count: u64,
    pub relative_engagement: String,
    pub relative_alignment: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtopics: Vec<TopicSummary>,
}

impl TopicSummary {
    pub fn from_stats<S: IScoringStrategy>(
        stats: &TopicStats<S>,
        context: &RelativeContext,
    ) -> AgoraResult<Self> {
        Ok(Self {
            name: stats.name.clone(),
            comment_count: stats.comment_count,
            vote_count: stats.vote_count(),
            relative_engagement: context.relative_engagement(stats),
            relative_alignment: context.relative_alignment(stats)?,
            subtopics: summarize(stats.subtopics(), context)?,
        })
    }
}

/// Project a sorted topic forest, preserving order.
pub fn summarize<S: IScoringStrategy>(
    topics: &[TopicStats<S>],
    context: &RelativeContext,
) -> AgoraResult<Vec<TopicSummary>> {
    topics
        .iter()
        .map(|t| TopicSummary::from_stats(t, context))
        .collect()
}
