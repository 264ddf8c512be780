//! Cache Module
//!
//! Cache-aside accessor over a distributed key-value store, plus the Redis and
//! in-memory store implementations.

mod entry;
mod error;
mod key;
mod memory;
mod options;
mod redis_store;
mod service;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use key::{build_key, KEY_DELIMITER};
pub use memory::MemoryStore;
pub use options::{EntryOptions, DEFAULT_ABSOLUTE_EXPIRATION, DEFAULT_SLIDING_EXPIRATION};
pub use redis_store::RedisStore;
pub use service::CacheService;
pub use store::DistributedCache;
