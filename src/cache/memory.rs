//! Memory Store Module
//!
//! In-process `DistributedCache` backed by a HashMap, with the same sliding and
//! absolute expiration rules as the Redis store.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::cache::{CacheEntry, DistributedCache, EntryOptions, Result};

// == Memory Store ==
/// In-memory key-value store with lazy and periodic expiration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_expired(now));

        before - entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl DistributedCache for MemoryStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        // Write lock: a hit refreshes the sliding window
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.get_mut(key) else {
            return Ok(None);
        };

        if entry.is_expired(now) {
            entries.remove(key);
            trace!(key, "Dropped expired entry on read");
            return Ok(None);
        }

        entry.touch(now);
        Ok(Some(entry.value.clone()))
    }

    async fn set_string(&self, key: &str, value: &str, options: &EntryOptions) -> Result<()> {
        let entry = CacheEntry::new(value.to_string(), options, Instant::now());
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
