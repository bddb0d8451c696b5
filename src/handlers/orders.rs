use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};

// Order persistence is not built yet; the mobile client expects these
// routes to exist, so they answer with fixed shapes.

/// GET /api/orders/:userId - always empty
pub async fn list(Path(_user_id): Path<i32>) -> Json<Value> {
    Json(json!([]))
}

/// POST /api/orders - fabricates a pending order id, persists nothing
pub async fn create(_payload: Option<Json<Value>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "id": format!("order-{}", Utc::now().timestamp_millis()),
            "status": "pending"
        })),
    )
}
