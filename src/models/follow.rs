use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Followers of one author, stored in the followers collection under the author's id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowersDocument {
    #[serde(default)]
    #[validate(custom = "validate_follower_ids")]
    pub followers: Option<Vec<String>>,
}

fn validate_follower_ids(ids: &Vec<String>) -> Result<(), ValidationError> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ValidationError::new("empty_follower_id"));
    }
    Ok(())
}
