use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::JwtConfig;

/// Session token claims. `sub` is the user's row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: String,
    pub exp: i64,
}

pub fn issue_token(user_id: i32, role: &str, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(config.expiry_hours)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(config.secret.as_bytes()))
}

pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Hash a password with a fresh random salt. Stored as `salt$hexdigest`.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest(&salt, password))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, hash)) => digest(salt, password) == hash,
        None => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Random placeholder password for users created through Google identity.
/// They never log in with it; it only satisfies the password column.
pub fn random_password() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A caller-supplied login identifier, classified as email or phone by
/// presence of '@'. Whitespace is trimmed before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginId {
    Email(String),
    Phone(String),
}

pub fn classify_identifier(raw: &str) -> Option<LoginId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('@') {
        Some(LoginId::Email(trimmed.to_string()))
    } else {
        Some(LoginId::Phone(trimmed.to_string()))
    }
}
