//! Domain records served by the simulated database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(id: i32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Aggregate payload returned by `GET /complex-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexData {
    pub products: Vec<Product>,
    pub users: Vec<User>,
    /// When the aggregate was assembled, not when it was cached
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(Product::new(1, "Laptop", 1000.0)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Laptop");
        assert_eq!(json["price"], 1000.0);
    }

    #[test]
    fn test_complex_data_timestamp_survives_json() {
        let data = ComplexData {
            products: vec![Product::new(3, "Tablet", 300.0)],
            users: vec![User::new(1, "john_doe", "john@example.com")],
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&data).unwrap();
        let decoded: ComplexData = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, data);
    }
}
