use serde::{Deserialize, Serialize};

/// One vote event in the numeric encoding used by the factorization model.
///
/// Ids are signed so that malformed input can be rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub user_id: i64,
    pub note_id: i64,
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: i64, note_id: i64, rating: f64) -> Self {
        Self {
            user_id,
            note_id,
            rating,
        }
    }
}
