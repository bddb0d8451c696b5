use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Review joined with the reviewer's public identity for display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductReview {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
    pub image_urls: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub reviewer_name: Option<String>,
    pub reviewer_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    #[serde(alias = "userId")]
    pub user_id: i32,
    #[serde(alias = "productId")]
    pub product_id: i32,
    pub rating: i32,
    #[serde(default, alias = "text", alias = "reviewText")]
    pub review_text: Option<String>,
    #[serde(default, alias = "imageUrls", alias = "images")]
    pub image_urls: Vec<String>,
}
