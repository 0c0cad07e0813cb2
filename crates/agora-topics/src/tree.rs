//! Topic aggregation tree.
//!
//! Each comment's topic forest is folded into nested buckets keyed by topic
//! name. A subtopic that lists no further subtopics holds the comments tagged
//! with it; every other bucket holds the union of its children's comments,
//! deduplicated by comment id. A comment listed under two subtopics of one
//! topic counts once for the topic and once for each subtopic, and a
//! top-level topic with no subtopics holds nothing.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::constants::OTHER_TOPIC_NAME;
use agora_core::errors::AgoraResult;
use agora_core::models::{Comment, Topic};
use agora_core::traits::IScoringStrategy;
use agora_observability::topic_tree_span;
use rayon::prelude::*;
use tracing::debug;

/// One topic or subtopic with a scoring strategy over exactly its comments.
#[derive(Debug, Clone)]
pub struct TopicStats<S> {
    pub name: String,
    pub comment_count: usize,
    /// `None` when no comment in this topic lists a subtopic.
    pub subtopic_stats: Option<Vec<TopicStats<S>>>,
    pub strategy: S,
}

impl<S: IScoringStrategy> TopicStats<S> {
    /// Total votes (passes included) across this node's comments.
    pub fn vote_count(&self) -> u64 {
        self.strategy.vote_count()
    }

    pub fn subtopics(&self) -> &[TopicStats<S>] {
        self.subtopic_stats.as_deref().unwrap_or_default()
    }

    /// This node followed by all of its descendants, depth first.
    pub fn nodes(&self) -> Vec<&TopicStats<S>> {
        let mut out = vec![self];
        for sub in self.subtopics() {
            out.extend(sub.nodes());
        }
        out
    }
}

#[derive(Debug, Default)]
struct Bucket {
    comments: BTreeMap<String, Arc<Comment>>,
    children: BTreeMap<String, Bucket>,
}

impl Bucket {
    /// Record `comment` under `topic` at `depth` (0 for top-level topics).
    ///
    /// Returns whether the comment landed in this bucket.
    fn insert(
        tree: &mut BTreeMap<String, Bucket>,
        topic: &Topic,
        comment: &Arc<Comment>,
        depth: usize,
    ) -> bool {
        let bucket = tree.entry(topic.name.clone()).or_default();
        let recorded = match topic.subtopics.as_deref() {
            Some(subs) if !subs.is_empty() => subs.iter().fold(false, |any, sub| {
                Self::insert(&mut bucket.children, sub, comment, depth + 1) || any
            }),
            _ => depth > 0,
        };
        if recorded {
            bucket
                .comments
                .entry(comment.id.clone())
                .or_insert_with(|| Arc::clone(comment));
        }
        recorded
    }
}

/// Build the sorted topic forest for `comments`.
///
/// Comments without topics are skipped. Top-level topics are built in
/// parallel; every level is sorted by descending comment count, then name,
/// with `"Other"` always last.
pub fn build_topic_stats<S: IScoringStrategy>(
    comments: &[Arc<Comment>],
    thresholds: &SelectionThresholds,
) -> AgoraResult<Vec<TopicStats<S>>> {
    let _span = topic_tree_span!(S::NAME, comments.len()).entered();

    let mut roots: BTreeMap<String, Bucket> = BTreeMap::new();
    for comment in comments {
        match comment.topics.as_deref() {
            Some(topics) if !topics.is_empty() => {
                for topic in topics {
                    if !Bucket::insert(&mut roots, topic, comment, 0) {
                        debug!(
                            comment_id = %comment.id,
                            topic = %topic.name,
                            "topic lists no subtopics, comment not counted"
                        );
                    }
                }
            }
            _ => debug!(comment_id = %comment.id, "comment has no topics, skipping"),
        }
    }

    let mut stats = roots
        .into_par_iter()
        .map(|(name, bucket)| build_node::<S>(name, bucket, thresholds))
        .collect::<AgoraResult<Vec<_>>>()?;
    stats.sort_by(topic_order);
    debug!(topics = stats.len(), "topic tree built");
    Ok(stats)
}

fn build_node<S: IScoringStrategy>(
    name: String,
    bucket: Bucket,
    thresholds: &SelectionThresholds,
) -> AgoraResult<TopicStats<S>> {
    let comments: Vec<Arc<Comment>> = bucket.comments.into_values().collect();
    let comment_count = comments.len();
    let subtopic_stats = if bucket.children.is_empty() {
        None
    } else {
        let mut subs = bucket
            .children
            .into_iter()
            .map(|(sub_name, sub)| build_node::<S>(sub_name, sub, thresholds))
            .collect::<AgoraResult<Vec<_>>>()?;
        subs.sort_by(topic_order);
        Some(subs)
    };
    let strategy = S::build(comments, thresholds)?;
    Ok(TopicStats {
        name,
        comment_count,
        subtopic_stats,
        strategy,
    })
}

fn topic_order<S>(a: &TopicStats<S>, b: &TopicStats<S>) -> Ordering {
    let a_other = a.name == OTHER_TOPIC_NAME;
    let b_other = b.name == OTHER_TOPIC_NAME;
    a_other
        .cmp(&b_other)
        .then_with(|| b.comment_count.cmp(&a.comment_count))
        .then_with(|| a.name.cmp(&b.name))
}
