//! # agora-selection
//!
//! Ranks comments for the common ground, differences of opinion, and
//! uncertainty sections of a report.
//!
//! ## 2 Scoring Strategies
//!
//! | Strategy | Common ground | Differences of opinion |
//! |----------|---------------|------------------------|
//! | Majority vote | max(agree, disagree) ≥ 0.7 | agree and disagree both in [0.4, 0.6] |
//! | Group informed | min group agree or disagree ≥ 0.6 | some group ≥ 0.3 away from the rest |
//!
//! Both rank with the same `top_k`: filter, sort by score descending (ties by
//! comment id), take `k`. Empty selections come with an explanation built
//! from the active thresholds.

pub mod group_informed;
pub mod groups;
pub mod majority;
pub mod pool;
pub mod uncertainty;

pub use group_informed::{GroupInformedStrategy, GroupMetrics};
pub use groups::stats_by_group;
pub use majority::MajorityVoteStrategy;
pub use pool::{CommentPool, Scored};
pub use uncertainty::uncertainty_floor;
