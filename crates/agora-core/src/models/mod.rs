mod comment;
mod rating;
mod selection;
mod vote;

pub use comment::{Comment, Topic};
pub use rating::Rating;
pub use selection::{GroupStats, RankedComment, Selection};
pub use vote::{GroupVoteTallies, VoteInfo, VoteTally};
