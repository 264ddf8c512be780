//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_product_cache_handler, complex_data_handler, create_product_handler,
    get_product_handler, get_user_handler, health_handler, list_products_handler, AppState,
};
use super::middleware::request_timing;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Request timing: logs elapsed time per request
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products", get(list_products_handler))
        .route("/product", post(create_product_handler))
        .route("/product/:id", get(get_product_handler))
        .route("/user/:username", get(get_user_handler))
        .route("/clear-product-cache", delete(clear_product_cache_handler))
        .route("/complex-data", get(complex_data_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(request_timing))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
