use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use sqlx::types::Json as Jsonb;

use crate::database::models::notification::NotificationInput;
use crate::database::models::Notification;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/notifications/:userId - newest first
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(notifications))
}

/// POST /api/notifications - used by internal flows, not the end client
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NotificationInput>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    let metadata = input.metadata.unwrap_or_else(|| json!({}));
    let notification = sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (user_id, title, description, type, metadata) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(input.user_id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.kind)
    .bind(Jsonb(metadata))
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// PUT /api/notifications/:userId/read - bulk mark-all-as-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1")
        .bind(user_id)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "updated": result.rows_affected() })))
}
