use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub sizes: Json<Vec<String>>,
    pub colors: Json<Vec<String>>,
    pub image_urls: Json<Vec<String>>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Canonical create/replace payload for a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default, alias = "imageUrls")]
    pub image_urls: Vec<String>,
    #[serde(default = "default_available", alias = "isAvailable")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}
