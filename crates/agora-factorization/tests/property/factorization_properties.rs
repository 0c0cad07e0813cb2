use agora_core::config::FactorizationConfig;
use agora_core::models::Rating;
use agora_factorization::Trainer;
use proptest::prelude::*;

fn arb_ratings() -> impl Strategy<Value = Vec<Rating>> {
    prop::collection::vec(
        (0i64..6, 0i64..6, prop::sample::select(vec![-1.0, 0.0, 1.0])),
        1..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(u, n, r)| Rating::new(u, n, r))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn output_covers_every_note_id(ratings in arb_ratings(), seed in any::<u64>()) {
        let config = FactorizationConfig {
            epochs: 3,
            seed: Some(seed),
            ..FactorizationConfig::default()
        };
        let report = Trainer::new(config).train(&ratings).unwrap();
        let max_note = ratings.iter().map(|r| r.note_id).max().unwrap();
        prop_assert_eq!(report.note_intercepts.len() as i64, max_note + 1);
        prop_assert!(report.note_intercepts.iter().all(|s| s.is_finite()));
        prop_assert!(report.final_loss >= 0.0);
    }

    #[test]
    fn seeded_training_is_deterministic(ratings in arb_ratings(), seed in any::<u64>()) {
        let config = FactorizationConfig {
            epochs: 2,
            seed: Some(seed),
            ..FactorizationConfig::default()
        };
        let a = Trainer::new(config.clone()).train(&ratings).unwrap();
        let b = Trainer::new(config).train(&ratings).unwrap();
        prop_assert_eq!(a, b);
    }
}
