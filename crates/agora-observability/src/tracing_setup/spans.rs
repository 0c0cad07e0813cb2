//! Span definitions per operation: selection, topic tree, relative context, factorization.

/// Create a selection span.
#[macro_export]
macro_rules! selection_span {
    ($strategy:expr, $comment_count:expr) => {
        tracing::info_span!("agora.selection", strategy = %$strategy, comment_count = $comment_count)
    };
}

/// Create a topic tree span.
#[macro_export]
macro_rules! topic_tree_span {
    ($strategy:expr, $comment_count:expr) => {
        tracing::info_span!("agora.topic_tree", strategy = %$strategy, comment_count = $comment_count)
    };
}

/// Create a relative context span.
#[macro_export]
macro_rules! relative_context_span {
    ($node_count:expr) => {
        tracing::debug_span!("agora.relative_context", node_count = $node_count)
    };
}

/// Create a factorization span.
#[macro_export]
macro_rules! factorization_span {
    ($rating_count:expr, $num_factors:expr) => {
        tracing::info_span!("agora.factorization", rating_count = $rating_count, num_factors = $num_factors)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SELECTION: &str = "agora.selection";
    pub const TOPIC_TREE: &str = "agora.topic_tree";
    pub const RELATIVE_CONTEXT: &str = "agora.relative_context";
    pub const FACTORIZATION: &str = "agora.factorization";
}
