//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles, including cache hits, misses and
//! invalidation observed through the simulated database's query counter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cache_aside::{
    api::create_router,
    cache::MemoryStore,
    database::{Latency, SimulatedDatabase},
    AppState, DistributedCache,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

struct TestApp {
    router: Router,
    state: AppState,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new(latency: Latency) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::with_store(store.clone(), "it:", SimulatedDatabase::new(latency));
        let router = create_router(state.clone());
        Self {
            router,
            state,
            store,
        }
    }

    fn instant() -> Self {
        Self::new(Latency::none())
    }

    async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    fn queries(&self) -> u64 {
        self.state.db.query_count()
    }
}

// == Products ==

#[tokio::test]
async fn test_products_second_call_served_from_cache() {
    let latency = Latency {
        list_products: Duration::from_millis(200),
        ..Latency::none()
    };
    let app = TestApp::new(latency);

    let start = Instant::now();
    let (status, first) = app.send("GET", "/products", None).await;
    let cold = start.elapsed();
    assert_eq!(status, StatusCode::OK);

    let start = Instant::now();
    let (status, second) = app.send("GET", "/products", None).await;
    let warm = start.elapsed();
    assert_eq!(status, StatusCode::OK);

    assert!(cold >= Duration::from_millis(200), "first call should pay database latency");
    assert!(warm < Duration::from_millis(200), "second call should skip the database");
    assert_eq!(first, second);
    assert_eq!(first.as_array().unwrap().len(), 3);
    assert_eq!(app.queries(), 1);
}

#[tokio::test]
async fn test_products_stored_under_namespaced_key() {
    let app = TestApp::instant();

    app.send("GET", "/products", None).await;

    assert!(app.store.get_string("it:products:list").await.unwrap().is_some());
}

#[tokio::test]
async fn test_clear_product_cache_forces_refetch() {
    let app = TestApp::instant();

    app.send("GET", "/products", None).await;
    let (status, body) = app.send("DELETE", "/clear-product-cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product cache cleared");

    app.send("GET", "/products", None).await;
    assert_eq!(app.queries(), 2);
}

#[tokio::test]
async fn test_clear_product_cache_when_empty() {
    let app = TestApp::instant();

    let (status, _) = app.send("DELETE", "/clear-product-cache", None).await;
    assert_eq!(status, StatusCode::OK);
}

// == Single Product ==

#[tokio::test]
async fn test_get_product_hit_after_miss() {
    let app = TestApp::instant();

    let (status, first) = app.send("GET", "/product/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["name"], "Smartphone");

    let (_, second) = app.send("GET", "/product/2", None).await;
    assert_eq!(first, second);
    assert_eq!(app.queries(), 1);
}

#[tokio::test]
async fn test_get_product_not_found_is_not_cached() {
    let app = TestApp::instant();

    let (status, body) = app.send("GET", "/product/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("error").is_some());

    app.send("GET", "/product/404", None).await;
    assert_eq!(app.queries(), 2);
    assert!(app.store.is_empty().await);
}

// == Create Product ==

#[tokio::test]
async fn test_create_product_then_read_from_cache() {
    let app = TestApp::instant();

    // Warm the list so the create has something to invalidate
    app.send("GET", "/products", None).await;

    let (status, created) = app
        .send("POST", "/product", Some(r#"{"id":0,"name":"Monitor","price":250.5}"#))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_i64().unwrap();
    assert!((100..1000).contains(&id));
    assert_eq!(created["name"], "Monitor");

    // The database catalog is fixed, so only the cache knows this product
    let (status, fetched) = app.send("GET", &format!("/product/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    assert!(app.store.get_string("it:products:list").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_product_invalid_payload() {
    let app = TestApp::instant();

    let (status, body) = app
        .send("POST", "/product", Some(r#"{"name":"","price":10}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_create_product_malformed_json() {
    let app = TestApp::instant();

    let (status, _) = app.send("POST", "/product", Some("not json")).await;
    assert!(status.is_client_error());
}

// == Users ==

#[tokio::test]
async fn test_get_user_profile_cached() {
    let app = TestApp::instant();

    let (status, user) = app.send("GET", "/user/jane_smith", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "jane_smith@example.com");

    app.send("GET", "/user/jane_smith", None).await;
    assert_eq!(app.queries(), 1);
    assert!(app
        .store
        .get_string("it:user:jane_smith:profile")
        .await
        .unwrap()
        .is_some());
}

// == Complex Data ==

#[tokio::test]
async fn test_complex_data_cached() {
    let app = TestApp::instant();

    let (status, first) = app.send("GET", "/complex-data", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["products"].as_array().unwrap().len(), 3);
    assert_eq!(first["users"][0]["username"], "john_doe");

    let (_, second) = app.send("GET", "/complex-data", None).await;
    assert_eq!(first["timestamp"], second["timestamp"]);
}

// == Corrupt Entries ==

#[tokio::test]
async fn test_corrupt_cache_entry_is_server_error() {
    let app = TestApp::instant();

    app.store
        .set_string(
            "it:products:list",
            r#"{"not":"a list"}"#,
            &cache_aside::EntryOptions::default(),
        )
        .await
        .unwrap();

    let (status, body) = app.send("GET", "/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("products:list"));
    assert_eq!(app.queries(), 0, "corrupt data is not treated as a miss");
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::instant();

    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body.get("timestamp").is_some());
}
