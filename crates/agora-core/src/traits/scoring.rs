use std::sync::Arc;

use crate::config::SelectionThresholds;
use crate::errors::AgoraResult;
use crate::models::{Comment, RankedComment, Selection};

/// A comment-scoring policy built once over an immutable comment subset.
///
/// Two implementations exist: majority vote (no opinion groups) and group
/// informed. Topic trees build one instance per topic and subtopic node.
pub trait IScoringStrategy: Send + Sync + Sized {
    /// Short label used in logs.
    const NAME: &'static str;

    /// The default threshold set for this policy.
    fn default_thresholds() -> SelectionThresholds;

    /// Build over `comments`. Comments below `min_vote_count` are kept in
    /// `comments()` but excluded from `filtered_comments()`.
    fn build(comments: Vec<Arc<Comment>>, thresholds: &SelectionThresholds) -> AgoraResult<Self>;

    /// Every input comment.
    fn comments(&self) -> &[Arc<Comment>];

    /// Comments eligible for scoring, ordered by id.
    fn filtered_comments(&self) -> &[Arc<Comment>];

    fn thresholds(&self) -> &SelectionThresholds;

    /// Uncertainty floor after the dynamic percentile raise.
    fn min_uncertainty_prob(&self) -> f64;

    /// Whether this policy uses opinion-group data.
    fn is_group_based(&self) -> bool;

    /// Comments where nearly everyone agrees or nearly everyone disagrees.
    fn common_ground_comments(&self, k: usize) -> Vec<RankedComment>;

    /// Common ground restricted to agreement.
    fn common_ground_agree_comments(&self, k: usize) -> Vec<RankedComment>;

    /// Common ground restricted to disagreement.
    fn common_ground_disagree_comments(&self, k: usize) -> Vec<RankedComment>;

    fn difference_of_opinion_comments(&self, k: usize) -> Vec<RankedComment>;

    /// Comments with an unusually high pass rate.
    fn uncertain_comments(&self, k: usize) -> Vec<RankedComment>;

    fn common_ground_no_comments_message(&self) -> String;

    fn differences_of_opinion_no_comments_message(&self) -> String;

    fn uncertainty_no_comments_message(&self) -> String;

    /// Default `k` for selections.
    fn max_sample_size(&self) -> usize {
        self.thresholds().max_sample_size
    }

    fn comment_count(&self) -> usize {
        self.comments().len()
    }

    /// Total votes (passes included) across every input comment.
    fn vote_count(&self) -> u64 {
        self.comments().iter().map(|c| c.vote_count(true)).sum()
    }

    /// Whether any comment carries a nested subtopic.
    fn contains_subtopics(&self) -> bool {
        self.comments().iter().any(|c| {
            c.topics
                .as_ref()
                .is_some_and(|topics| topics.iter().any(|t| t.has_subtopics()))
        })
    }

    fn common_ground_selection(&self, k: usize) -> Selection {
        Selection::new(self.common_ground_comments(k), || {
            self.common_ground_no_comments_message()
        })
    }

    fn difference_of_opinion_selection(&self, k: usize) -> Selection {
        Selection::new(self.difference_of_opinion_comments(k), || {
            self.differences_of_opinion_no_comments_message()
        })
    }

    fn uncertainty_selection(&self, k: usize) -> Selection {
        Selection::new(self.uncertain_comments(k), || {
            self.uncertainty_no_comments_message()
        })
    }
}
