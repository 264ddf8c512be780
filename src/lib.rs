//! Cache Aside - HTTP service demonstrating the cache-aside pattern
//!
//! Requests read through a distributed cache (Redis, or an in-memory stand-in)
//! before falling back to a slow simulated database, and write results back
//! with sliding and absolute expiration.

pub mod api;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{build_key, CacheError, CacheService, DistributedCache, EntryOptions};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
