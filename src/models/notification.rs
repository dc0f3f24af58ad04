use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Comment,
    Reply,
    Featured,
    NewPuzzle,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Comment => "comment",
            NotificationKind::Reply => "reply",
            NotificationKind::Featured => "featured",
            NotificationKind::NewPuzzle => "newpuzzle",
        }
    }

    /// Kinds that only exist while the puzzle is public.
    pub fn comment_kinds() -> &'static [NotificationKind] {
        &[NotificationKind::Comment, NotificationKind::Reply]
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通知记录，存储在 notifications 集合中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: String,
    pub kind: NotificationKind,
    pub recipient: String,
    pub puzzle_id: String,
    pub puzzle_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub emailed: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Record ids are derived, so regenerating a notification always lands on the same key.
    pub fn notification_id(
        recipient: &str,
        kind: NotificationKind,
        puzzle_id: &str,
        comment_id: Option<&str>,
    ) -> String {
        match comment_id {
            Some(comment_id) => format!("{}-{}-{}-{}", recipient, kind, puzzle_id, comment_id),
            None => format!("{}-{}-{}", recipient, kind, puzzle_id),
        }
    }

    /// Carries over the fields owned by the recipient and the mailer from a stored copy.
    pub fn keep_delivery_state(&mut self, stored: &NotificationRecord) {
        self.read = stored.read;
        self.emailed = stored.emailed;
        self.created_at = stored.created_at;
    }
}

/// Output of the comment tree diff: who should hear about which comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSeed {
    pub kind: NotificationKind,
    pub recipient: String,
    pub comment_id: String,
    pub comment_author_name: String,
    pub posted_at: DateTime<Utc>,
}
