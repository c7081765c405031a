// Resource shapes. Every field is optional and serializes as null when
// absent, so responses always carry the full model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.username.as_deref().map_or(true, str::is_empty) {
            missing.push("username");
        }
        if self.email.as_deref().map_or(true, str::is_empty) {
            missing.push("email");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_serialize_as_null() {
        let user = User {
            id: Some(1),
            username: Some("john_doe".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 1);
        assert!(value["phone"].is_null());
        assert_eq!(value.as_object().unwrap().len(), 10);
    }

    #[test]
    fn required_field_checks() {
        assert_eq!(User::default().missing_required(), vec!["username", "email"]);
        let product = Product {
            name: Some("Desk".into()),
            ..Default::default()
        };
        assert_eq!(product.missing_required(), vec!["price"]);
    }
}
