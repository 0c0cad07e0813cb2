use agora_core::models::{GroupVoteTallies, VoteTally};
use agora_stats::consensus::GroupConsensus;
use agora_stats::descriptive;
use agora_stats::estimator::rates;
use proptest::prelude::*;

fn arb_tally() -> impl Strategy<Value = VoteTally> {
    (0u64..10_000, 0u64..10_000, prop::option::of(0u64..10_000)).prop_map(
        |(agree_count, disagree_count, pass_count)| VoteTally {
            agree_count,
            disagree_count,
            pass_count,
        },
    )
}

fn arb_groups() -> impl Strategy<Value = GroupVoteTallies> {
    prop::collection::btree_map("[A-Z][a-z]{0,4}", arb_tally(), 1..5)
}

// ── Estimates stay strictly inside (0, 1) ───────────────────────────────

proptest! {
    #[test]
    fn estimates_strictly_inside_unit_interval(
        tally in arb_tally(),
        include_passes in any::<bool>(),
    ) {
        let r = rates(&tally, include_passes, true).unwrap();
        for p in [r.agree, r.disagree, r.pass] {
            prop_assert!(p > 0.0 && p < 1.0, "rate out of (0,1): {} for {:?}", p, tally);
        }
    }

    #[test]
    fn all_zero_tally_is_inside_unit_interval(include_passes in any::<bool>()) {
        let r = rates(&VoteTally::new(0, 0, 0), include_passes, true).unwrap();
        prop_assert_eq!(r.agree, 0.5);
        prop_assert_eq!(r.pass, 0.5);
    }
}

// ── Consensus bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn consensus_never_exceeds_worst_group(groups in arb_groups()) {
        let metrics = GroupConsensus::new(&groups);
        let product = metrics.consensus().unwrap();
        let min = metrics.min_agree_prob().unwrap();
        prop_assert!(product > 0.0);
        prop_assert!(product <= min + 1e-12);
    }

    #[test]
    fn group_difference_bounded(groups in arb_groups()) {
        let metrics = GroupConsensus::new(&groups);
        let max = metrics.max_agree_prob_difference().unwrap();
        prop_assert!((0.0..1.0).contains(&max));
        for name in groups.keys() {
            let diff = metrics.agree_prob_difference(name).unwrap();
            prop_assert!(diff.abs() <= max + 1e-12);
        }
    }
}

// ── Percentile stays within the sample range ────────────────────────────

proptest! {
    #[test]
    fn percentile_within_range(values in prop::collection::vec(0.0f64..1.0, 1..50), p in 0.0f64..=1.0) {
        let q = descriptive::percentile(&values, p).unwrap().unwrap();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(q >= min - 1e-12 && q <= max + 1e-12);
    }
}
