use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

/// A single comment on a puzzle, together with the replies posted under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub text: String,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
    #[serde(default)]
    #[validate]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Finds the comment with `id` among one level of siblings.
    pub fn find<'a>(siblings: &'a [CommentNode], id: &str) -> Option<&'a CommentNode> {
        siblings.iter().find(|comment| comment.id == id)
    }

    /// Visits every comment of a forest depth-first, parents before children.
    pub fn walk<'a>(forest: &'a [CommentNode], visit: &mut impl FnMut(&'a CommentNode)) {
        for comment in forest {
            visit(comment);
            Self::walk(&comment.children, visit);
        }
    }
}
