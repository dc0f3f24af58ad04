use crate::models::{
    comment::CommentNode,
    notification::{NotificationKind, NotificationSeed},
};

/// Compares two snapshots of a comment forest and returns a seed for every notification the
/// new comments call for.
///
/// Each node of `after` is matched by id against the same level of `before`. A node missing
/// from `before` notifies the puzzle author with a `comment` seed, unless the author wrote it,
/// and notifies the parent's author with a `reply` seed when that is a third person. Children
/// are always visited, against the matched node's children or against nothing when the node is
/// new, so replies nested under other new replies still reach their immediate parent.
///
/// Seeds come out depth-first in the sibling order of `after`.
pub fn diff(
    before: Option<&[CommentNode]>,
    after: &[CommentNode],
    puzzle_author_id: &str,
    parent: Option<&CommentNode>,
) -> Vec<NotificationSeed> {
    let mut seeds = Vec::new();
    collect(before, after, puzzle_author_id, parent, &mut seeds);
    seeds
}

fn collect(
    before: Option<&[CommentNode]>,
    after: &[CommentNode],
    puzzle_author_id: &str,
    parent: Option<&CommentNode>,
    seeds: &mut Vec<NotificationSeed>,
) {
    for comment in after {
        let previous = before.and_then(|siblings| CommentNode::find(siblings, &comment.id));

        if previous.is_none() {
            // Don't notify on your own comment
            if comment.author_id != puzzle_author_id {
                seeds.push(seed(NotificationKind::Comment, puzzle_author_id, comment));
            }
            // Replies under the puzzle author's comments are covered by the comment seed above
            if let Some(parent) = parent {
                if comment.author_id != parent.author_id && parent.author_id != puzzle_author_id {
                    seeds.push(seed(NotificationKind::Reply, &parent.author_id, comment));
                }
            }
        }

        collect(
            previous.map(|p| p.children.as_slice()),
            &comment.children,
            puzzle_author_id,
            Some(comment),
            seeds,
        );
    }
}

fn seed(kind: NotificationKind, recipient: &str, comment: &CommentNode) -> NotificationSeed {
    NotificationSeed {
        kind,
        recipient: recipient.to_string(),
        comment_id: comment.id.clone(),
        comment_author_name: comment.author_name.clone(),
        posted_at: comment.posted_at,
    }
}
