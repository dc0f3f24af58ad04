use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A user's play of a puzzle. Keyed by `{puzzleId}-{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    pub puzzle_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PlayRecord {
    pub fn key(puzzle_id: &str, user_id: &str) -> String {
        format!("{}-{}", puzzle_id, user_id)
    }
}
