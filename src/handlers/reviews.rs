use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use sqlx::types::Json as Jsonb;

use crate::database::models::review::ReviewInput;
use crate::database::models::ProductReview;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/reviews/:productId - reviews with reviewer identity, newest first
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<ProductReview>>, ApiError> {
    let reviews = sqlx::query_as::<_, ProductReview>(
        "SELECT r.id, r.user_id, r.product_id, r.rating, r.review_text, r.image_urls, r.created_at, \
                u.name AS reviewer_name, u.profile_image_url AS reviewer_image \
         FROM reviews r JOIN users u ON u.id = r.user_id \
         WHERE r.product_id = $1 ORDER BY r.created_at DESC",
    )
    .bind(product_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> Result<(StatusCode, Json<ProductReview>), ApiError> {
    let review = sqlx::query_as::<_, ProductReview>(
        "WITH inserted AS ( \
            INSERT INTO reviews (user_id, product_id, rating, review_text, image_urls) \
            VALUES ($1, $2, $3, $4, $5) RETURNING * \
         ) \
         SELECT i.id, i.user_id, i.product_id, i.rating, i.review_text, i.image_urls, i.created_at, \
                u.name AS reviewer_name, u.profile_image_url AS reviewer_image \
         FROM inserted i JOIN users u ON u.id = i.user_id",
    )
    .bind(input.user_id)
    .bind(input.product_id)
    .bind(input.rating)
    .bind(&input.review_text)
    .bind(Jsonb(&input.image_urls))
    .fetch_one(&state.pool)
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
