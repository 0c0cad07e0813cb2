use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::models::{Comment, Topic, VoteTally};
use agora_core::traits::IScoringStrategy;
use agora_selection::{GroupInformedStrategy, MajorityVoteStrategy};
use agora_topics::{build_topic_stats, TopicStats};
use test_fixtures::load_conversation;

fn fixture() -> Vec<Arc<Comment>> {
    let comments: Vec<Comment> = load_conversation("two_subtopics");
    comments.into_iter().map(Arc::new).collect()
}

fn names<S>(stats: &[TopicStats<S>]) -> Vec<&str> {
    stats.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn comment_in_two_subtopics_counts_once_for_topic() {
    let topics =
        build_topic_stats::<GroupInformedStrategy>(&fixture(), &SelectionThresholds::group_informed())
            .unwrap();
    let economy = &topics[0];
    assert_eq!(economy.name, "Economy");
    assert_eq!(economy.comment_count, 3);

    let subs = economy.subtopics();
    assert_eq!(names(subs), vec!["Housing", "Jobs"]);
    assert_eq!(subs[0].comment_count, 2);
    assert_eq!(subs[1].comment_count, 2);
    let subtopic_total: usize = subs.iter().map(|s| s.comment_count).sum();
    assert!(subtopic_total > economy.comment_count);
}

#[test]
fn other_is_last_even_when_larger() {
    let topics =
        build_topic_stats::<MajorityVoteStrategy>(&fixture(), &SelectionThresholds::majority_vote())
            .unwrap();
    assert_eq!(names(&topics), vec!["Economy", "Environment", "Other"]);
    let other = &topics[2];
    assert_eq!(other.comment_count, 3);
    assert_eq!(names(other.subtopics()), vec!["Other"]);
    assert_eq!(other.subtopics()[0].comment_count, 3);
}

#[test]
fn topic_count_is_union_of_subtopic_sets() {
    let votes = VoteTally::new(20, 5, 1);
    let tagged = |id: &str, topic: Topic| {
        Arc::new(
            Comment::new(id, "t")
                .with_votes(votes)
                .with_topics(vec![topic]),
        )
    };
    let comments = vec![
        tagged("1", Topic::nested("Economy", vec![Topic::flat("Jobs")])),
        tagged("2", Topic::flat("Economy")),
        tagged("3", Topic::flat("Parks")),
    ];
    let topics =
        build_topic_stats::<MajorityVoteStrategy>(&comments, &SelectionThresholds::majority_vote())
            .unwrap();
    assert_eq!(names(&topics), vec!["Economy", "Parks"]);

    let economy = &topics[0];
    let union: usize = economy.subtopics().iter().map(|s| s.comment_count).sum();
    assert_eq!(economy.comment_count, 1);
    assert_eq!(economy.comment_count, union);
    assert_eq!(economy.strategy.comments()[0].id, "1");

    let parks = &topics[1];
    assert_eq!(parks.comment_count, 0);
    assert!(parks.subtopic_stats.is_none());
    assert_eq!(parks.vote_count(), 0);
}

#[test]
fn node_strategies_cover_exactly_their_comments() {
    let topics =
        build_topic_stats::<MajorityVoteStrategy>(&fixture(), &SelectionThresholds::majority_vote())
            .unwrap();
    let economy = &topics[0];
    let mut ids: Vec<&str> = economy.strategy.comments().iter().map(|c| c.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(economy.vote_count(), 42 + 38 + 42);
    assert_eq!(economy.subtopics()[1].vote_count(), 42 + 38);
    // Comment 6 has too few votes to be scored but still counts toward its topic.
    let other = &topics[2];
    assert_eq!(other.strategy.comment_count(), 3);
    assert_eq!(other.strategy.filtered_comments().len(), 2);
}

#[test]
fn untagged_comments_are_skipped() {
    let topics =
        build_topic_stats::<MajorityVoteStrategy>(&fixture(), &SelectionThresholds::majority_vote())
            .unwrap();
    let total: usize = topics.iter().map(|t| t.comment_count).sum();
    assert_eq!(total, 7);
}

#[test]
fn third_level_subtopics_aggregate_recursively() {
    let votes = VoteTally::new(20, 5, 1);
    let comments = vec![
        Arc::new(
            Comment::new("1", "t")
                .with_votes(votes)
                .with_topics(vec![Topic::nested(
                    "Transit",
                    vec![Topic::nested("Buses", vec![Topic::flat("Night routes")])],
                )]),
        ),
        Arc::new(
            Comment::new("2", "t")
                .with_votes(votes)
                .with_topics(vec![Topic::nested(
                    "Transit",
                    vec![Topic::nested(
                        "Buses",
                        vec![Topic::flat("Night routes"), Topic::flat("Fares")],
                    )],
                )]),
        ),
        Arc::new(
            Comment::new("3", "t")
                .with_votes(votes)
                .with_topics(vec![Topic::flat("Transit")]),
        ),
    ];
    let topics =
        build_topic_stats::<MajorityVoteStrategy>(&comments, &SelectionThresholds::majority_vote())
            .unwrap();
    // Comment 3 names Transit without a subtopic, so only 1 and 2 count.
    let transit = &topics[0];
    assert_eq!(transit.comment_count, 2);
    let buses = &transit.subtopics()[0];
    assert_eq!(buses.comment_count, 2);
    assert_eq!(names(buses.subtopics()), vec!["Night routes", "Fares"]);
    assert_eq!(buses.subtopics()[0].comment_count, 2);
    assert_eq!(buses.subtopics()[1].comment_count, 1);
    assert_eq!(transit.nodes().len(), 4);
}

#[test]
fn group_informed_tree_fails_on_ungrouped_votes() {
    let comments = vec![Arc::new(
        Comment::new("1", "t")
            .with_votes(VoteTally::new(30, 0, 0))
            .with_topics(vec![Topic::nested("Parks", vec![Topic::flat("Trails")])]),
    )];
    assert!(build_topic_stats::<GroupInformedStrategy>(
        &comments,
        &SelectionThresholds::group_informed()
    )
    .is_err());
}
