use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::comment::Comment;

/// A selected comment together with the score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedComment {
    pub comment: Arc<Comment>,
    pub score: f64,
}

impl RankedComment {
    pub fn id(&self) -> &str {
        &self.comment.id
    }
}

/// The outcome of a selection: ranked comments, or an explanation of why none qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub comments: Vec<RankedComment>,
    /// Set only when `comments` is empty.
    pub empty_message: Option<String>,
}

impl Selection {
    pub fn new(comments: Vec<RankedComment>, empty_message: impl FnOnce() -> String) -> Self {
        let empty_message = comments.is_empty().then(empty_message);
        Self {
            comments,
            empty_message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.comments.iter().map(RankedComment::id).collect()
    }
}

/// Total votes cast by one opinion group across a set of comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub name: String,
    pub vote_count: u64,
}
