use crate::{
    error::Result,
    models::{notification::NotificationRecord, response::ApiResponse},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub limit: Option<usize>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/:user_id/notifications", get(list_notifications))
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<ApiResponse<Vec<NotificationRecord>>>> {
    let limit = state.page_size(query.limit);
    let notifications = state
        .notification_service
        .list_for_user(&user_id, limit)
        .await?;

    Ok(Json(ApiResponse::success(notifications)))
}
