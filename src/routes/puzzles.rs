use crate::{
    error::{AppError, Result},
    models::{notification::NotificationRecord, puzzle::PuzzleDocument, response::ApiResponse},
    services::puzzle_change::ChangeSummary,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body sent by the document-change trigger for one puzzle write.
#[derive(Debug, Deserialize)]
pub struct PuzzleChangeEvent {
    #[serde(default)]
    pub before: Option<PuzzleDocument>,
    pub after: PuzzleDocument,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:puzzle_id/changes", post(apply_change))
        .route("/:puzzle_id/notifications/preview", post(preview_notifications))
}

async fn apply_change(
    State(state): State<Arc<AppState>>,
    Path(puzzle_id): Path<String>,
    Json(event): Json<PuzzleChangeEvent>,
) -> Result<Json<ApiResponse<ChangeSummary>>> {
    check_puzzle_id(&puzzle_id)?;
    tracing::debug!("Applying change to puzzle {}", puzzle_id);

    match state
        .puzzle_change_service
        .apply_puzzle_change(event.before.as_ref(), &event.after, &puzzle_id)
        .await
    {
        Ok(summary) => Ok(Json(ApiResponse::success(summary))),
        Err(e) => {
            tracing::error!("Failed to apply change to puzzle {}: {}", puzzle_id, e);
            Err(e)
        }
    }
}

async fn preview_notifications(
    State(state): State<Arc<AppState>>,
    Path(puzzle_id): Path<String>,
    Json(event): Json<PuzzleChangeEvent>,
) -> Result<Json<ApiResponse<Vec<NotificationRecord>>>> {
    check_puzzle_id(&puzzle_id)?;

    let records = state
        .puzzle_change_service
        .compute_notifications(event.before.as_ref(), &event.after, &puzzle_id)
        .await?;

    let message = format!("{} notifications would be written", records.len());
    Ok(Json(ApiResponse::success_with_message(records, message)))
}

fn check_puzzle_id(puzzle_id: &str) -> Result<()> {
    if puzzle_id.trim().is_empty() {
        return Err(AppError::bad_request("Puzzle id must not be blank"));
    }
    Ok(())
}
