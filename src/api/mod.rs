//! API Module
//!
//! HTTP handlers and routing for the cache-aside demo service.
//!
//! # Endpoints
//! - `GET /products` - Product list (cached 10m sliding / 1h absolute)
//! - `GET /product/:id` - Single product (cached 5m sliding)
//! - `POST /product` - Save a product and refresh the affected cache keys
//! - `GET /user/:username` - User profile (cached 30m sliding)
//! - `DELETE /clear-product-cache` - Drop the cached product list
//! - `GET /complex-data` - Aggregate payload (cached 2h absolute)
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
