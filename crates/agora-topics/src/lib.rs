//! # agora-topics
//!
//! Groups comments by their topic forest and builds one scoring strategy per
//! topic and subtopic node. [`RelativeContext`] then describes each node's
//! engagement and alignment against the rest of the tree.

pub mod relative_context;
pub mod summary;
pub mod tree;

pub use relative_context::{RelativeContext, RelativeLevel};
pub use summary::{summarize, TopicSummary};
pub use tree::{build_topic_stats, TopicStats};
