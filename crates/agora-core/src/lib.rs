//! # agora-core
//!
//! Foundation crate for the Agora consensus engine.
//! Defines the vote data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{AgoraConfig, FactorizationConfig, SelectionThresholds};
pub use errors::{AgoraError, AgoraResult};
pub use models::{
    Comment, GroupStats, GroupVoteTallies, RankedComment, Rating, Selection, Topic, VoteInfo,
    VoteTally,
};
pub use traits::IScoringStrategy;
