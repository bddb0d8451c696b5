use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Canonical address-create payload. Clients built against different app
/// versions send the same logical fields under different names; every
/// accepted alias is listed here and nowhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInput {
    #[serde(alias = "userId")]
    pub user_id: i32,
    #[serde(default, alias = "name", alias = "recipientName")]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "zip", alias = "postalCode")]
    pub pincode: Option<String>,
    #[serde(default, alias = "isDefault")]
    pub is_default: bool,
}

impl AddressInput {
    /// Single street line: `street` wins, otherwise compose address1/address2.
    pub fn street_line(&self) -> Option<String> {
        if let Some(street) = &self.street {
            return Some(street.clone());
        }
        match (&self.address1, &self.address2) {
            (Some(a1), Some(a2)) => Some(format!("{}, {}", a1, a2)),
            (Some(a1), None) => Some(a1.clone()),
            (None, Some(a2)) => Some(a2.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_legacy_field_names() {
        let input: AddressInput = serde_json::from_value(json!({
            "userId": 3,
            "name": "Asha R",
            "zip": "560001",
            "address1": "12 MG Road",
            "address2": "2nd Cross",
            "isDefault": true
        }))
        .unwrap();
        assert_eq!(input.user_id, 3);
        assert_eq!(input.recipient_name.as_deref(), Some("Asha R"));
        assert_eq!(input.pincode.as_deref(), Some("560001"));
        assert!(input.is_default);
        assert_eq!(input.street_line().as_deref(), Some("12 MG Road, 2nd Cross"));
    }

    #[test]
    fn accepts_canonical_field_names() {
        let input: AddressInput = serde_json::from_value(json!({
            "user_id": 4,
            "street": "7 Brigade Road",
            "pincode": "560025"
        }))
        .unwrap();
        assert_eq!(input.user_id, 4);
        assert_eq!(input.street_line().as_deref(), Some("7 Brigade Road"));
        assert!(!input.is_default);
    }

    #[test]
    fn street_line_handles_partial_parts() {
        let only_a1: AddressInput =
            serde_json::from_value(json!({ "user_id": 1, "address1": "12 MG Road" })).unwrap();
        assert_eq!(only_a1.street_line().as_deref(), Some("12 MG Road"));

        let none: AddressInput = serde_json::from_value(json!({ "user_id": 1 })).unwrap();
        assert!(none.street_line().is_none());
    }
}
