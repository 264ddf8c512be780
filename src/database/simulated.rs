//! Simulated Database
//!
//! Fixed product/user data behind artificial query latency.

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::models::{ComplexData, Product, User};

/// Lowest id handed out by `save_product`.
const FIRST_ASSIGNED_ID: i32 = 100;
/// Assigned ids stay below this bound.
const ASSIGNED_ID_LIMIT: i32 = 1000;

// == Latency ==
/// Per-query delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list_products: Duration,
    pub product_by_id: Duration,
    pub save_product: Duration,
    pub user_by_username: Duration,
    /// Spent before the nested product list query
    pub complex_data: Duration,
}

impl Latency {
    /// No delays at all; used by tests.
    pub fn none() -> Self {
        Self {
            list_products: Duration::ZERO,
            product_by_id: Duration::ZERO,
            save_product: Duration::ZERO,
            user_by_username: Duration::ZERO,
            complex_data: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list_products: Duration::from_millis(100),
            product_by_id: Duration::from_millis(500),
            save_product: Duration::from_millis(1000),
            user_by_username: Duration::from_millis(500),
            complex_data: Duration::from_millis(2000),
        }
    }
}

// == Simulated Database ==
/// In-process stand-in for a slow relational database.
#[derive(Debug)]
pub struct SimulatedDatabase {
    latency: Latency,
    /// Number of queries executed, nested ones included
    queries: AtomicU64,
    next_id: AtomicI32,
}

impl SimulatedDatabase {
    // == Constructor ==
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            queries: AtomicU64::new(0),
            next_id: AtomicI32::new(0),
        }
    }

    /// Total queries executed so far.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    // == Queries ==
    /// Returns the full product catalog.
    pub async fn products(&self) -> Vec<Product> {
        self.query("products", self.latency.list_products).await;
        catalog()
    }

    /// Looks up a single product.
    pub async fn product_by_id(&self, id: i32) -> Option<Product> {
        self.query("product_by_id", self.latency.product_by_id).await;
        catalog().into_iter().find(|product| product.id == id)
    }

    /// Persists a product and returns it with its newly assigned id.
    ///
    /// The catalog itself is fixed, so saved products are not visible to later
    /// `products` or `product_by_id` queries.
    pub async fn save_product(&self, name: String, price: f64) -> Product {
        self.query("save_product", self.latency.save_product).await;
        Product {
            id: self.assign_id(),
            name,
            price,
        }
    }

    /// Every username resolves to a profile.
    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.query("user_by_username", self.latency.user_by_username)
            .await;
        Some(User::new(1, username, format!("{}@example.com", username)))
    }

    /// Builds the aggregate products + users payload.
    pub async fn complex_data(&self) -> ComplexData {
        self.query("complex_data", self.latency.complex_data).await;
        ComplexData {
            products: self.products().await,
            users: vec![
                User::new(1, "john_doe", "john@example.com"),
                User::new(2, "jane_smith", "jane@example.com"),
            ],
            timestamp: Utc::now(),
        }
    }

    async fn query(&self, name: &str, delay: Duration) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        debug!("Database query '{}' ({}ms)", name, delay.as_millis());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn assign_id(&self) -> i32 {
        let span = ASSIGNED_ID_LIMIT - FIRST_ASSIGNED_ID;
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        FIRST_ASSIGNED_ID + n.rem_euclid(span)
    }
}

impl Default for SimulatedDatabase {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

fn catalog() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", 1000.0),
        Product::new(2, "Smartphone", 500.0),
        Product::new(3, "Tablet", 300.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn instant_db() -> SimulatedDatabase {
        SimulatedDatabase::new(Latency::none())
    }

    #[tokio::test]
    async fn test_products_returns_catalog() {
        let db = instant_db();
        let products = db.products().await;

        assert_eq!(products.len(), 3);
        assert_eq!(products[0], Product::new(1, "Laptop", 1000.0));
        assert_eq!(db.query_count(), 1);
    }

    #[tokio::test]
    async fn test_product_by_id_found_and_missing() {
        let db = instant_db();

        assert_eq!(db.product_by_id(2).await.unwrap().name, "Smartphone");
        assert!(db.product_by_id(99).await.is_none());
        assert_eq!(db.query_count(), 2);
    }

    #[tokio::test]
    async fn test_save_product_assigns_id_in_range() {
        let db = instant_db();

        for _ in 0..5 {
            let saved = db.save_product("Monitor".to_string(), 250.0).await;
            assert!((100..1000).contains(&saved.id));
            assert_eq!(saved.name, "Monitor");
        }
    }

    #[test]
    fn test_assigned_ids_wrap_within_range() {
        let db = instant_db();
        db.next_id.store(899, Ordering::Relaxed);

        assert_eq!(db.assign_id(), 999);
        assert_eq!(db.assign_id(), 100);
    }

    #[tokio::test]
    async fn test_user_by_username_builds_email() {
        let db = instant_db();
        let user = db.user_by_username("alice").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_complex_data_counts_nested_query() {
        let db = instant_db();
        let data = db.complex_data().await;

        assert_eq!(data.products.len(), 3);
        assert_eq!(data.users.len(), 2);
        assert_eq!(db.query_count(), 2);
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let latency = Latency {
            list_products: Duration::from_millis(60),
            ..Latency::none()
        };
        let db = SimulatedDatabase::new(latency);

        let start = Instant::now();
        db.products().await;
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
