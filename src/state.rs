use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        database::DocumentStore,
        follow::FollowService,
        notification::NotificationService,
        play::PlayService,
        puzzle_change::PuzzleChangeService,
    },
};

/// 应用程序的共享状态
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 通知服务
    pub notification_service: NotificationService,

    /// 谜题变更协调服务
    pub puzzle_change_service: PuzzleChangeService,
}

impl AppState {
    /// Wires every service on top of one store.
    pub fn new(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let follow_service = FollowService::new(store.clone());
        let notification_service =
            NotificationService::new(store.clone(), follow_service, config.write_concurrency);
        let play_service = PlayService::new(store, config.write_concurrency);
        let puzzle_change_service =
            PuzzleChangeService::new(notification_service.clone(), play_service);

        Self {
            config,
            notification_service,
            puzzle_change_service,
        }
    }

    /// 获取分页配置
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.notifications_page_size)
            .clamp(1, self.config.notifications_page_size.max(1))
    }
}
