//! API Handlers
//!
//! HTTP request handlers. Each read goes through the cache-aside accessor with
//! a fixed key template and expiration policy; writes invalidate or refresh the
//! affected keys.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};

use crate::cache::{CacheService, DistributedCache};
use crate::database::SimulatedDatabase;
use crate::error::{ApiError, Result};
use crate::models::{
    ComplexData, CreateProductRequest, HealthResponse, MessageResponse, Product, User,
};

// == Expiration Policies ==
const PRODUCT_LIST_SLIDING: Duration = Duration::from_secs(10 * 60);
const PRODUCT_LIST_ABSOLUTE: Duration = Duration::from_secs(60 * 60);
const PRODUCT_SLIDING: Duration = Duration::from_secs(5 * 60);
const SAVED_PRODUCT_SLIDING: Duration = Duration::from_secs(60 * 60);
const USER_PROFILE_SLIDING: Duration = Duration::from_secs(30 * 60);
const COMPLEX_DATA_ABSOLUTE: Duration = Duration::from_secs(2 * 60 * 60);

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside accessor
    pub cache: CacheService,
    /// Slow data source behind the cache
    pub db: Arc<SimulatedDatabase>,
}

impl AppState {
    /// Creates a new AppState from an accessor and a database.
    pub fn new(cache: CacheService, db: SimulatedDatabase) -> Self {
        Self {
            cache,
            db: Arc::new(db),
        }
    }

    /// Creates a new AppState over `store`, keyed under `namespace`.
    pub fn with_store(
        store: Arc<dyn DistributedCache>,
        namespace: &str,
        db: SimulatedDatabase,
    ) -> Self {
        Self::new(CacheService::new(store).with_namespace(namespace), db)
    }
}

fn product_list_key(cache: &CacheService) -> String {
    cache.build_key(&["products", "list"])
}

fn product_key(cache: &CacheService, id: i32) -> String {
    cache.build_key(&["product".to_string(), id.to_string()])
}

/// Handler for GET /products
pub async fn list_products_handler(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let db = &state.db;

    let products = state
        .cache
        .get_or_set(
            &product_list_key(&state.cache),
            move || async move { Ok::<_, ApiError>(Some(db.products().await)) },
            Some(PRODUCT_LIST_SLIDING),
            Some(PRODUCT_LIST_ABSOLUTE),
        )
        .await?
        .unwrap_or_default();

    Ok(Json(products))
}

/// Handler for GET /product/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let db = &state.db;

    let product = state
        .cache
        .get_or_set(
            &product_key(&state.cache, id),
            move || async move { Ok::<_, ApiError>(db.product_by_id(id).await) },
            Some(PRODUCT_SLIDING),
            None,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))?;

    Ok(Json(product))
}

/// Handler for POST /product
///
/// Saves the product, drops the cached product list and caches the new product
/// under its assigned id.
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Product>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let saved = state.db.save_product(req.name, req.price).await;

    state.cache.remove(&product_list_key(&state.cache)).await?;
    state
        .cache
        .set(
            &product_key(&state.cache, saved.id),
            &saved,
            Some(SAVED_PRODUCT_SLIDING),
            None,
        )
        .await?;

    let location = format!("/product/{}", saved.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

/// Handler for GET /user/:username
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<User>> {
    let db = &state.db;
    let key = state.cache.build_key(&["user", username.as_str(), "profile"]);
    let lookup = username.as_str();

    let user = state
        .cache
        .get_or_set(
            &key,
            move || async move { Ok::<_, ApiError>(db.user_by_username(lookup).await) },
            Some(USER_PROFILE_SLIDING),
            None,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {}", username)))?;

    Ok(Json(user))
}

/// Handler for DELETE /clear-product-cache
pub async fn clear_product_cache_handler(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    state.cache.remove(&product_list_key(&state.cache)).await?;
    Ok(Json(MessageResponse::new("Product cache cleared")))
}

/// Handler for GET /complex-data
pub async fn complex_data_handler(State(state): State<AppState>) -> Result<Json<ComplexData>> {
    let db = &state.db;

    let data = state
        .cache
        .get_or_set(
            &state.cache.build_key(&["complex", "data"]),
            move || async move { Ok::<_, ApiError>(Some(db.complex_data().await)) },
            None,
            Some(COMPLEX_DATA_ABSOLUTE),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Complex data".to_string()))?;

    Ok(Json(data))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
