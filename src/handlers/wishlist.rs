use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::Product;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/wishlist/:userId - wishlisted products, most recently added first
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT p.* FROM products p \
         JOIN wishlist w ON w.product_id = p.id \
         WHERE w.user_id = $1 ORDER BY w.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(products))
}

#[derive(Debug, Deserialize)]
pub struct WishlistInput {
    #[serde(alias = "userId")]
    pub user_id: i32,
    #[serde(alias = "productId")]
    pub product_id: i32,
}

/// POST /api/wishlist - idempotent; re-adding an existing pair is a no-op
pub async fn add(
    State(state): State<AppState>,
    Json(input): Json<WishlistInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    sqlx::query("INSERT INTO wishlist (user_id, product_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(input.user_id)
        .bind(input.product_id)
        .execute(&state.pool)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Added to wishlist" }))))
}

/// DELETE /api/wishlist/:userId/:productId - idempotent; removing an absent
/// entry still succeeds
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(i32, i32)>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM wishlist WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Removed from wishlist" })))
}
