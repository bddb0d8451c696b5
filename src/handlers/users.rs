use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;

use crate::database::models::{PublicUser, User};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[serde(default, alias = "profileImageUrl")]
    pub profile_image_url: Option<String>,
}

/// PUT /api/users/:id - partial profile update; omitted fields keep their
/// previous values.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET name = COALESCE($1, name), profile_image_url = COALESCE($2, profile_image_url) \
         WHERE id = $3 RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.profile_image_url)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(PublicUser::from(&user)))
}
