/// Matrix factorization trainer errors.
#[derive(Debug, thiserror::Error)]
pub enum FactorizationError {
    #[error("no ratings supplied")]
    EmptyRatings,

    #[error("negative {field} {value} in rating #{index}")]
    NegativeId {
        field: &'static str,
        value: i64,
        index: usize,
    },

    #[error("rating #{index} is not finite: {value}")]
    NonFiniteRating { index: usize, value: f64 },

    #[error("learning rate must be positive and finite, got {rate}")]
    InvalidLearningRate { rate: f64 },

    #[error("learning rate schedule is empty")]
    EmptySchedule,

    #[error("factor dimensionality must be at least 1")]
    InvalidFactorCount,

    #[error("vote {vote} is not one of -1, 0, 1 (voter {voter_id}, comment {comment_id})")]
    InvalidVote {
        voter_id: String,
        comment_id: String,
        vote: i64,
    },

    #[error("training cancelled after {steps} steps")]
    Cancelled { steps: usize },
}
