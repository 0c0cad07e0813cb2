use serde::{Deserialize, Serialize};

use super::vote::VoteInfo;

/// A topic or subtopic label. Subtopics nest recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopics: Option<Vec<Topic>>,
}

impl Topic {
    /// A topic with no subtopic list.
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtopics: None,
        }
    }

    pub fn nested(name: impl Into<String>, subtopics: Vec<Topic>) -> Self {
        Self {
            name: name.into(),
            subtopics: Some(subtopics),
        }
    }

    /// Whether this topic lists at least one subtopic.
    pub fn has_subtopics(&self) -> bool {
        self.subtopics.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// A statement participants voted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique within a conversation.
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_info: Option<VoteInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
}

impl Comment {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            vote_info: None,
            topics: None,
        }
    }

    pub fn with_votes(mut self, vote_info: impl Into<VoteInfo>) -> Self {
        self.vote_info = Some(vote_info.into());
        self
    }

    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = Some(topics);
        self
    }

    /// Total votes on this comment; 0 when it carries no vote data.
    pub fn vote_count(&self, include_passes: bool) -> u64 {
        self.vote_info
            .as_ref()
            .map_or(0, |info| info.total_count(include_passes))
    }
}
