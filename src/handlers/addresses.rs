use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::database::models::address::AddressInput;
use crate::database::models::Address;
use crate::error::ApiError;
use crate::state::AppState;

const INSERT_ADDRESS: &str = "INSERT INTO addresses \
    (user_id, recipient_name, phone, street, city, state, pincode, is_default) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *";

/// GET /api/addresses/:userId - default address first, then newest
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Address>>, ApiError> {
    let addresses = sqlx::query_as::<_, Address>(
        "SELECT * FROM addresses WHERE user_id = $1 ORDER BY is_default DESC, created_at DESC",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(addresses))
}

/// POST /api/addresses - create, normalizing legacy field names. Creating a
/// default address clears the user's other defaults in the same transaction,
/// so at most one default can exist per user.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<Address>), ApiError> {
    let street = input.street_line();

    let address = if input.is_default {
        let mut tx = state.pool.begin().await?;
        sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
            .bind(input.user_id)
            .execute(&mut *tx)
            .await?;
        let address = insert_address(&mut *tx, &input, &street).await?;
        tx.commit().await?;
        address
    } else {
        insert_address(&state.pool, &input, &street).await?
    };

    Ok((StatusCode::CREATED, Json(address)))
}

async fn insert_address<'e, E>(
    executor: E,
    input: &AddressInput,
    street: &Option<String>,
) -> Result<Address, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query_as::<_, Address>(INSERT_ADDRESS)
        .bind(input.user_id)
        .bind(&input.recipient_name)
        .bind(&input.phone)
        .bind(street)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .bind(input.is_default)
        .fetch_one(executor)
        .await
}

/// DELETE /api/addresses/:userId/:addressId - scoped to the owning user
pub async fn delete(
    State(state): State<AppState>,
    Path((user_id, address_id)): Path<(i32, i32)>,
) -> Result<Json<Value>, ApiError> {
    sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
        .bind(address_id)
        .bind(user_id)
        .execute(&state.pool)
        .await?;
    Ok(Json(json!({ "message": "Address deleted" })))
}
