use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use sqlx::types::Json as Jsonb;

use crate::database::models::product::ProductInput;
use crate::database::models::Product;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/products - newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
            .fetch_all(&state.pool)
            .await?;
    Ok(Json(products))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, price, description, sizes, colors, image_urls, is_available) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&input.name)
    .bind(input.price)
    .bind(&input.description)
    .bind(Jsonb(&input.sizes))
    .bind(Jsonb(&input.colors))
    .bind(Jsonb(&input.image_urls))
    .bind(input.is_available)
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id - full replace
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET name = $1, price = $2, description = $3, sizes = $4, colors = $5, \
         image_urls = $6, is_available = $7 WHERE id = $8 RETURNING *",
    )
    .bind(&input.name)
    .bind(input.price)
    .bind(&input.description)
    .bind(Jsonb(&input.sizes))
    .bind(Jsonb(&input.colors))
    .bind(Jsonb(&input.image_urls))
    .bind(input.is_available)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let deleted = sqlx::query_scalar::<_, i32>("DELETE FROM products WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    if deleted.is_none() {
        return Err(ApiError::not_found("Product not found"));
    }
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
