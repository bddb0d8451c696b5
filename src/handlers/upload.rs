use axum::extract::{Multipart, State};
use axum::response::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/upload - single multipart field named "image", forwarded to
/// the media host. Upload failures are logged in full; the client only
/// sees a generic message.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?;
            image = Some(data.to_vec());
            break;
        }
    }

    let Some(buffer) = image else {
        return Err(ApiError::bad_request("No image file provided"));
    };

    match state.media.upload(buffer).await {
        Ok(uploaded) => Ok(Json(json!({
            "url": uploaded.secure_url,
            "public_id": uploaded.public_id
        }))),
        Err(e) => {
            tracing::error!("Upload error: {}", e);
            Err(ApiError::internal_server_error("Failed to upload image"))
        }
    }
}
