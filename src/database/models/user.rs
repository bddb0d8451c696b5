use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: Option<String>,
    pub profile_image_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection returned by auth and profile routes. Never includes
/// the password hash or timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub email: Option<String>,
    pub role: String,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            phone: user.phone.clone(),
            name: user.name.clone(),
            profile_image_url: user.profile_image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_projection_omits_password() {
        let user = User {
            id: 7,
            phone: Some("9876543210".to_string()),
            email: None,
            password: "salt$digest".to_string(),
            name: Some("Asha".to_string()),
            profile_image_url: None,
            role: "user".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["role"], "user");
        assert!(value.get("password").is_none());
    }
}
