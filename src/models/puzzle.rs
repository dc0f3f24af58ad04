use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use validator::{Validate, ValidationError};

use crate::models::comment::CommentNode;

/// 谜题文档
/// 只包含通知引擎关心的字段，网格和线索等由其他服务维护
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_unique_comment_ids"))]
pub struct PuzzleDocument {
    #[validate(length(min = 1))]
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub private_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_mini_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate]
    pub comments: Vec<CommentNode>,
}

fn validate_unique_comment_ids(puzzle: &PuzzleDocument) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    let mut duplicate = None;
    CommentNode::walk(&puzzle.comments, &mut |comment| {
        if !seen.insert(comment.id.as_str()) && duplicate.is_none() {
            duplicate = Some(comment.id.clone());
        }
    });

    match duplicate {
        Some(id) => {
            let mut error = ValidationError::new("duplicate_comment_id");
            error.add_param("id".into(), &id);
            Err(error)
        }
        None => Ok(()),
    }
}
