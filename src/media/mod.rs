use chrono::Utc;
use reqwest::multipart;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::CloudinaryConfig;

/// Errors from the media host adapter
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("media host rejected upload: {0}")]
    Rejected(String),
}

/// Result of a successful upload: the CDN-served URL and the asset id.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Adapter for Cloudinary's signed image-upload API. Buffers are uploaded
/// as-is into a fixed folder; no size or type validation happens here.
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl MediaClient {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    pub async fn upload(&self, buffer: Vec<u8>) -> Result<UploadedImage, MediaError> {
        let timestamp = Utc::now().timestamp();
        let signature = sign_upload(&self.config.folder, timestamp, &self.config.api_secret);

        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(buffer).file_name("upload"))
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.config.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        );

        let response = self.http.post(&url).multipart(form).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(MediaError::Rejected(format!("{}: {}", status, detail)));
        }

        Ok(response.json::<UploadedImage>().await?)
    }
}

/// Request signature over the signed params (alphabetical order) plus the
/// API secret, per Cloudinary's signed-upload scheme.
fn sign_upload(folder: &str, timestamp: i64, api_secret: &str) -> String {
    let to_sign = format!("folder={}&timestamp={}{}", folder, timestamp, api_secret);
    hex::encode(Sha256::digest(to_sign.as_bytes()))
}
