//! # agora-stats
//!
//! Turns vote tallies into probabilities.
//!
//! ```text
//! VoteTally ──► estimator ──► VoteRates
//! VoteInfo  ──► aggregate ──► pooled VoteRates, vote counts
//! GroupVoteTallies ──► consensus ──► products, minima, group-vs-rest gaps
//! ```
//!
//! Rates default to the MAP estimate `(count + 1) / (total + 2)`, which keeps
//! every probability strictly inside (0, 1) and defined for empty tallies.

pub mod aggregate;
pub mod consensus;
pub mod descriptive;
pub mod estimator;

pub use aggregate::{comment_vote_count, pooled_tally, total_rates};
pub use consensus::GroupConsensus;
pub use estimator::{rates, VoteRates};

/// Result alias for rate computations.
pub type StatsResult<T> = Result<T, agora_core::errors::StatsError>;
