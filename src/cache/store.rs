//! Distributed Cache Store Module
//!
//! String-keyed, string-valued store the accessor talks to.

use async_trait::async_trait;

use crate::cache::{EntryOptions, Result};

/// Backing key-value store for the cache accessor.
///
/// Implementations own expiration: a hit refreshes the sliding window (capped
/// by the absolute expiration) and expired entries are reported as absent.
#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Returns the stored string, or `None` if the key is absent or expired.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any existing entry and its expiration.
    async fn set_string(&self, key: &str, value: &str, options: &EntryOptions) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
