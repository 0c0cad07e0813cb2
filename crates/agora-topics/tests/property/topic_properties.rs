use std::collections::BTreeSet;
use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::models::{Comment, Topic, VoteTally};
use agora_core::traits::IScoringStrategy;
use agora_selection::MajorityVoteStrategy;
use agora_topics::{build_topic_stats, TopicStats};
use proptest::prelude::*;

const TOPICS: [&str; 4] = ["Economy", "Health", "Other", "Transit"];
const SUBTOPICS: [&str; 3] = ["Alpha", "Beta", "Gamma"];

fn arb_topic() -> impl Strategy<Value = Topic> {
    (
        prop::sample::select(TOPICS.to_vec()),
        prop::collection::vec(prop::sample::select(SUBTOPICS.to_vec()), 0..3),
    )
        .prop_map(|(name, subs)| {
            if subs.is_empty() {
                Topic::flat(name)
            } else {
                Topic::nested(name, subs.into_iter().map(Topic::flat).collect())
            }
        })
}

fn arb_comments() -> impl Strategy<Value = Vec<Arc<Comment>>> {
    prop::collection::vec(
        (prop::collection::vec(arb_topic(), 0..3), 0u64..40, 0u64..40),
        0..25,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (topics, a, d))| {
                Arc::new(
                    Comment::new(format!("{i}"), "t")
                        .with_votes(VoteTally::new(a, d, 0))
                        .with_topics(topics),
                )
            })
            .collect()
    })
}

fn assert_sorted<S>(level: &[TopicStats<S>]) -> Result<(), TestCaseError> {
    for pair in level.windows(2) {
        prop_assert!(pair[0].name != "Other");
        if pair[1].name != "Other" {
            prop_assert!(
                pair[0].comment_count > pair[1].comment_count
                    || (pair[0].comment_count == pair[1].comment_count
                        && pair[0].name < pair[1].name)
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn levels_are_sorted_and_counts_are_consistent(comments in arb_comments()) {
        let topics: Vec<TopicStats<MajorityVoteStrategy>> =
            build_topic_stats(&comments, &SelectionThresholds::majority_vote()).unwrap();
        assert_sorted(&topics)?;
        for topic in &topics {
            prop_assert!(topic.comment_count <= comments.len());
            prop_assert_eq!(topic.comment_count, topic.strategy.comments().len());
            let subs = topic.subtopics();
            assert_sorted(subs)?;
            let mut union = BTreeSet::new();
            for sub in subs {
                prop_assert!(sub.comment_count <= topic.comment_count);
                union.extend(sub.strategy.comments().iter().map(|c| c.id.clone()));
            }
            prop_assert_eq!(topic.comment_count, union.len());
        }
    }
}
