use crate::{
    error::Result,
    models::{
        notification::{NotificationKind, NotificationRecord},
        puzzle::PuzzleDocument,
    },
    services::{
        comment_diff,
        notification::NotificationService,
        play::PlayService,
        visibility::PuzzleState,
    },
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use validator::Validate;

/// Index cleanup a change calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
    Nothing,
    /// The puzzle stopped being public: drop its comment and reply notifications.
    CommentNotifications,
    /// The puzzle was deleted: drop every notification and play for it.
    Everything,
}

/// What one puzzle write means for the notification and play collections.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePlan {
    pub from: PuzzleState,
    pub to: PuzzleState,
    pub records: Vec<NotificationRecord>,
    pub cleanup: Cleanup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub puzzle_id: String,
    pub from: PuzzleState,
    pub to: PuzzleState,
    pub upserted: usize,
    pub notifications_deleted: usize,
    pub plays_deleted: usize,
}

/// 谜题变更协调服务
/// 每次谜题写入都以 (before, after) 调用，保证重复投递时结果一致
#[derive(Clone)]
pub struct PuzzleChangeService {
    notification_service: NotificationService,
    play_service: PlayService,
}

impl PuzzleChangeService {
    pub fn new(notification_service: NotificationService, play_service: PlayService) -> Self {
        Self {
            notification_service,
            play_service,
        }
    }

    /// Notifications the change would upsert. Reads followers, never writes.
    pub async fn compute_notifications(
        &self,
        before: Option<&PuzzleDocument>,
        after: &PuzzleDocument,
        puzzle_id: &str,
    ) -> Result<Vec<NotificationRecord>> {
        self.compute_notifications_at(before, after, puzzle_id, Utc::now()).await
    }

    pub async fn compute_notifications_at(
        &self,
        before: Option<&PuzzleDocument>,
        after: &PuzzleDocument,
        puzzle_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<NotificationRecord>> {
        Ok(self.plan(before, after, puzzle_id, now).await?.records)
    }

    pub async fn apply_puzzle_change(
        &self,
        before: Option<&PuzzleDocument>,
        after: &PuzzleDocument,
        puzzle_id: &str,
    ) -> Result<ChangeSummary> {
        self.apply_puzzle_change_at(before, after, puzzle_id, Utc::now()).await
    }

    /// Brings the notification and play collections in line with `after`.
    ///
    /// Writes are upserts by derived id and unconditional deletes, so re-running the same pair
    /// after a partial failure converges on the same state.
    pub async fn apply_puzzle_change_at(
        &self,
        before: Option<&PuzzleDocument>,
        after: &PuzzleDocument,
        puzzle_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ChangeSummary> {
        let plan = self.plan(before, after, puzzle_id, now).await?;
        let ChangePlan { from, to, records, cleanup } = plan;

        let (upserted, (notifications_deleted, plays_deleted)) = futures::try_join!(
            self.notification_service.upsert_all(records),
            self.clean_up(puzzle_id, cleanup),
        )?;

        let summary = ChangeSummary {
            puzzle_id: puzzle_id.to_string(),
            from,
            to,
            upserted,
            notifications_deleted,
            plays_deleted,
        };
        info!(
            "Puzzle {} {:?} -> {:?}: {} upserted, {} notifications and {} plays removed",
            puzzle_id, from, to, upserted, notifications_deleted, plays_deleted
        );
        Ok(summary)
    }

    pub async fn plan(
        &self,
        before: Option<&PuzzleDocument>,
        after: &PuzzleDocument,
        puzzle_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ChangePlan> {
        after.validate()?;
        if let Some(before) = before {
            before.validate()?;
        }

        let from = PuzzleState::before_change(before, now);
        let to = PuzzleState::of(Some(after), now);
        // 已过发布时间的定时谜题：from 仍记为 PrivateUntil，但评论通知已经存在
        let was_visible = PuzzleState::of(before, now).is_public();
        debug!("Puzzle {} transition {:?} -> {:?}", puzzle_id, from, to);

        if to == PuzzleState::Deleted {
            return Ok(ChangePlan {
                from,
                to,
                records: Vec::new(),
                cleanup: Cleanup::Everything,
            });
        }

        let mut records = Vec::new();
        let mut cleanup = Cleanup::Nothing;

        match (from.is_public(), to.is_public()) {
            (false, true) => {
                // Rebuild from scratch: anything said while hidden was never notified
                let seeds = comment_diff::diff(None, &after.comments, &after.author_id, None);
                records.extend(NotificationService::from_seeds(puzzle_id, after, seeds));
                records.extend(
                    self.notification_service
                        .new_puzzle_fan_out(puzzle_id, after, now)
                        .await?,
                );
            }
            (true, true) => {
                let seeds = comment_diff::diff(
                    before.map(|b| b.comments.as_slice()),
                    &after.comments,
                    &after.author_id,
                    None,
                );
                records.extend(NotificationService::from_seeds(puzzle_id, after, seeds));
            }
            (_, false) if was_visible => cleanup = Cleanup::CommentNotifications,
            (_, false) => {}
        }

        // A brand-new puzzle only gets the creation fan-out
        if let Some(before) = before {
            records.extend(NotificationService::featured_transition(before, after, puzzle_id, now));
        }

        Ok(ChangePlan {
            from,
            to,
            records,
            cleanup,
        })
    }

    async fn clean_up(&self, puzzle_id: &str, cleanup: Cleanup) -> Result<(usize, usize)> {
        match cleanup {
            Cleanup::Nothing => Ok((0, 0)),
            Cleanup::CommentNotifications => {
                let removed = self
                    .notification_service
                    .delete_for_puzzle(puzzle_id, NotificationKind::comment_kinds())
                    .await?;
                Ok((removed, 0))
            }
            Cleanup::Everything => futures::try_join!(
                self.notification_service.delete_for_puzzle(puzzle_id, &[]),
                self.play_service.delete_for_puzzle(puzzle_id),
            ),
        }
    }
}
