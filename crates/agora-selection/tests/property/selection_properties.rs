use std::sync::Arc;

use agora_core::config::SelectionThresholds;
use agora_core::models::{Comment, GroupVoteTallies, VoteTally};
use agora_core::traits::IScoringStrategy;
use agora_selection::{GroupInformedStrategy, MajorityVoteStrategy};
use proptest::prelude::*;

fn arb_tally() -> impl Strategy<Value = VoteTally> {
    (0u64..60, 0u64..60, 0u64..60).prop_map(|(a, d, p)| VoteTally::new(a, d, p))
}

fn arb_single_comments() -> impl Strategy<Value = Vec<Arc<Comment>>> {
    prop::collection::vec(arb_tally(), 0..30).prop_map(|tallies| {
        tallies
            .into_iter()
            .enumerate()
            .map(|(i, t)| Arc::new(Comment::new(format!("c{i:03}"), "t").with_votes(t)))
            .collect()
    })
}

fn arb_grouped_comments() -> impl Strategy<Value = Vec<Arc<Comment>>> {
    prop::collection::vec((arb_tally(), arb_tally()), 0..30).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| {
                let groups: GroupVoteTallies =
                    [("A".to_string(), a), ("B".to_string(), b)].into_iter().collect();
                Arc::new(Comment::new(format!("c{i:03}"), "t").with_votes(groups))
            })
            .collect()
    })
}

// ── top_k contract ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn top_k_is_bounded_sorted_and_filtered(comments in arb_single_comments(), k in 0usize..40) {
        let s = MajorityVoteStrategy::build(comments, &SelectionThresholds::majority_vote()).unwrap();
        let ranked = s.top_k(|e| e.rates.pass, k, |_| true);
        prop_assert_eq!(ranked.len(), k.min(s.filtered_comments().len()));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].id() < pair[1].id());
            }
        }
        for r in &ranked {
            prop_assert!(r.comment.vote_count(true) >= 20);
        }
    }

    #[test]
    fn uncertainty_floor_never_below_base(comments in arb_single_comments()) {
        let thresholds = SelectionThresholds::majority_vote();
        let s = MajorityVoteStrategy::build(comments, &thresholds).unwrap();
        prop_assert!(s.min_uncertainty_prob() >= thresholds.min_uncertainty_prob);
        for r in s.uncertain_comments(100) {
            prop_assert!(r.score > s.min_uncertainty_prob());
        }
    }

    #[test]
    fn group_common_ground_and_differences_are_disjoint(comments in arb_grouped_comments()) {
        let s = GroupInformedStrategy::build(comments, &SelectionThresholds::group_informed()).unwrap();
        let agree: Vec<String> = s
            .common_ground_agree_comments(100)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        for r in s.difference_of_opinion_comments(100) {
            prop_assert!(!agree.contains(&r.id().to_string()));
        }
    }
}
