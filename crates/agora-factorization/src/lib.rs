//! # agora-factorization
//!
//! Fits `r̂(u, n) = μ + i_u + i_n + f_u · f_n` to observed ratings by
//! regularized least squares. The learned note intercepts `i_n` are the
//! helpfulness scores: how much a note is agreed with irrespective of which
//! side of a polarizing axis a user sits on.
//!
//! Training is full-batch Adam over a learning-rate schedule, with a fresh
//! optimizer per rate.

pub mod adam;
pub mod cancellation;
pub mod encoding;
pub mod model;
pub mod trainer;

pub use cancellation::CancellationToken;
pub use encoding::{helpfulness_by_comment, RatingEncoding, RatingIndex, VoteEvent};
pub use model::{FactorModel, ModelShape};
pub use trainer::{helpfulness_scores, Trainer, TrainingReport};

/// Result alias for factorization operations.
pub type FactorizationResult<T> = Result<T, agora_core::errors::FactorizationError>;
