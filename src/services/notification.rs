use crate::{
    error::Result,
    models::{
        notification::{NotificationKind, NotificationRecord, NotificationSeed},
        puzzle::PuzzleDocument,
    },
    services::{
        database::{Collection, DocumentStore, Filter},
        follow::FollowService,
    },
};
use chrono::{DateTime, Utc};
use futures::{stream, StreamExt, TryStreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 通知服务
/// 负责把评论差异和谜题状态变化转换成通知记录，并写入 notifications 集合
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn DocumentStore>,
    follow_service: FollowService,
    write_concurrency: usize,
}

impl NotificationService {
    pub fn new(store: Arc<dyn DocumentStore>, follow_service: FollowService, write_concurrency: usize) -> Self {
        Self {
            store,
            follow_service,
            write_concurrency: write_concurrency.max(1),
        }
    }

    /// Turns comment/reply seeds into records for `puzzle`.
    pub fn from_seeds(
        puzzle_id: &str,
        puzzle: &PuzzleDocument,
        seeds: Vec<NotificationSeed>,
    ) -> Vec<NotificationRecord> {
        seeds
            .into_iter()
            .map(|seed| NotificationRecord {
                id: NotificationRecord::notification_id(
                    &seed.recipient,
                    seed.kind,
                    puzzle_id,
                    Some(&seed.comment_id),
                ),
                kind: seed.kind,
                recipient: seed.recipient,
                puzzle_id: puzzle_id.to_string(),
                puzzle_title: puzzle.title.clone(),
                comment_id: Some(seed.comment_id),
                comment_author_name: Some(seed.comment_author_name),
                label: None,
                read: false,
                emailed: false,
                created_at: seed.posted_at,
            })
            .collect()
    }

    /// Featured wins over a daily mini assignment; at most one record per change.
    pub fn featured_transition(
        before: &PuzzleDocument,
        after: &PuzzleDocument,
        puzzle_id: &str,
        now: DateTime<Utc>,
    ) -> Option<NotificationRecord> {
        let label = if after.featured && !before.featured {
            None
        } else if let (Some(date), None) = (after.daily_mini_date, before.daily_mini_date) {
            Some(format!("the daily mini for {}", date))
        } else {
            return None;
        };

        Some(Self::puzzle_record(
            NotificationKind::Featured,
            &after.author_id,
            puzzle_id,
            after,
            label,
            now,
        ))
    }

    /// One `newpuzzle` record per follower of the puzzle's author.
    pub async fn new_puzzle_fan_out(
        &self,
        puzzle_id: &str,
        puzzle: &PuzzleDocument,
        now: DateTime<Utc>,
    ) -> Result<Vec<NotificationRecord>> {
        let followers = self.follow_service.followers_of(&puzzle.author_id).await?;
        Ok(followers
            .iter()
            .filter(|follower| **follower != puzzle.author_id)
            .map(|follower| {
                Self::puzzle_record(NotificationKind::NewPuzzle, follower, puzzle_id, puzzle, None, now)
            })
            .collect())
    }

    fn puzzle_record(
        kind: NotificationKind,
        recipient: &str,
        puzzle_id: &str,
        puzzle: &PuzzleDocument,
        label: Option<String>,
        now: DateTime<Utc>,
    ) -> NotificationRecord {
        NotificationRecord {
            id: NotificationRecord::notification_id(recipient, kind, puzzle_id, None),
            kind,
            recipient: recipient.to_string(),
            puzzle_id: puzzle_id.to_string(),
            puzzle_title: puzzle.title.clone(),
            comment_id: None,
            comment_author_name: None,
            label,
            read: false,
            emailed: false,
            created_at: puzzle.published_at.unwrap_or(now),
        }
    }

    /// Upserts every record, keeping the stored read/emailed state of records that already exist.
    pub async fn upsert_all(&self, records: Vec<NotificationRecord>) -> Result<usize> {
        let mut seen = HashSet::new();
        let records: Vec<NotificationRecord> = records
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();
        let count = records.len();

        stream::iter(records.into_iter().map(|record| self.upsert(record)))
            .buffer_unordered(self.write_concurrency)
            .try_collect::<Vec<()>>()
            .await?;

        debug!("Upserted {} notifications", count);
        Ok(count)
    }

    async fn upsert(&self, mut record: NotificationRecord) -> Result<()> {
        if let Some(stored) = self.store.get(Collection::Notifications, &record.id).await? {
            match serde_json::from_value::<NotificationRecord>(stored) {
                Ok(stored) => record.keep_delivery_state(&stored),
                Err(e) => warn!("Replacing unreadable notification {}: {}", record.id, e),
            }
        }

        let doc = serde_json::to_value(&record)?;
        self.store.set(Collection::Notifications, &record.id, doc).await
    }

    /// Deletes the puzzle's notifications of the given kinds, or of every kind when `kinds` is empty.
    pub async fn delete_for_puzzle(&self, puzzle_id: &str, kinds: &[NotificationKind]) -> Result<usize> {
        let mut filter = Filter::new().eq("puzzleId", puzzle_id);
        if !kinds.is_empty() {
            filter = filter.one_of("kind", kinds.iter().map(|kind| kind.as_str()));
        }

        let docs = self.store.query(Collection::Notifications, &filter).await?;
        let count = docs.len();
        let store = &self.store;

        stream::iter(docs.into_iter().map(|doc| async move {
            store.delete(Collection::Notifications, &doc.id).await
        }))
        .buffer_unordered(self.write_concurrency)
        .try_collect::<Vec<()>>()
        .await?;

        info!("Removed {} notifications for puzzle {}", count, puzzle_id);
        Ok(count)
    }

    /// The recipient's notifications, newest first.
    pub async fn list_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<NotificationRecord>> {
        let docs = self
            .store
            .query(Collection::Notifications, &Filter::new().eq("recipient", user_id))
            .await?;

        let mut records = Vec::with_capacity(docs.len());
        for doc in docs {
            match serde_json::from_value::<NotificationRecord>(doc.data) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable notification {}: {}", doc.id, e),
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        records.truncate(limit);
        Ok(records)
    }
}
