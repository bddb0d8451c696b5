use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::database::store;
use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Ladies Boutique API is running" }))
}

/// GET /api/app-version - update metadata for the mobile client. The APK
/// itself is served from the static /downloads mount.
pub async fn app_version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "url": format!("{}/downloads/ladies-boutique.apk", state.config.public_base_url),
        "forceUpdate": false,
        "releaseNotes": "Initial professional release with cloud database and auto-update support."
    }))
}

/// GET /api/db-init - re-run schema initialization on demand. Always
/// reports the attempt; failures are logged, not surfaced.
pub async fn db_init(State(state): State<AppState>) -> Json<Value> {
    store::init_db(&state.pool).await;
    Json(json!({ "message": "Database initialization attempted" }))
}

#[derive(Debug, FromRow)]
struct DebugUserRow {
    id: i32,
    phone: Option<String>,
    email: Option<String>,
    name: Option<String>,
    role: String,
}

#[derive(Debug, Serialize)]
pub struct DebugUser {
    id: i32,
    phone: Option<String>,
    email: Option<String>,
    name: Option<String>,
    role: String,
    member_id: String,
}

/// GET /api/debug/users - diagnostic listing with display member ids
pub async fn debug_users(State(state): State<AppState>) -> Result<Json<Vec<DebugUser>>, ApiError> {
    let rows = sqlx::query_as::<_, DebugUserRow>(
        "SELECT id, phone, email, name, role FROM users ORDER BY id",
    )
    .fetch_all(&state.pool)
    .await?;

    let users = rows
        .into_iter()
        .map(|u| DebugUser {
            member_id: member_id(u.id),
            id: u.id,
            phone: u.phone,
            email: u.email,
            name: u.name,
            role: u.role,
        })
        .collect();

    Ok(Json(users))
}

fn member_id(id: i32) -> String {
    format!("RKJ{:03}", id)
}
