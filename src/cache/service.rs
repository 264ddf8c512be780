//! Cache-Aside Accessor
//!
//! Typed get / get-or-populate / set / remove over a `DistributedCache`, with
//! JSON serialization and the default expiration policy applied in one place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::cache::{build_key, CacheError, DistributedCache, EntryOptions, Result};

// == Cache Service ==
/// Cache-aside accessor shared by all request handlers.
///
/// Holds no mutable state of its own, so clones are cheap and independent.
/// There is no single-flight protection: concurrent misses on the same key
/// each run their populate callback and the last write wins.
#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn DistributedCache>,
    /// Prefix prepended to every key before it reaches the store
    namespace: Arc<str>,
}

impl CacheService {
    // == Constructor ==
    /// Creates an accessor over `store` with an empty namespace.
    pub fn new(store: Arc<dyn DistributedCache>) -> Self {
        Self {
            store,
            namespace: Arc::from(""),
        }
    }

    /// Sets the prefix applied to every stored key, e.g. `"myapp:"`.
    pub fn with_namespace(mut self, namespace: impl AsRef<str>) -> Self {
        self.namespace = Arc::from(namespace.as_ref());
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Joins key parts with `:`. See [`build_key`].
    pub fn build_key<S: AsRef<str>>(&self, parts: &[S]) -> String {
        build_key(parts)
    }

    // == Get ==
    /// Reads and deserializes the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or holds an empty string. A
    /// payload that does not decode into `T` is an error, not a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = self.store.get_string(&self.storage_key(key)).await?;

        match raw {
            Some(raw) if !raw.is_empty() => {
                debug!("Cache hit for key: {}", key);
                serde_json::from_str(&raw)
                    .map(Some)
                    .map_err(|source| CacheError::Deserialization {
                        key: key.to_string(),
                        source,
                    })
            }
            _ => {
                debug!("Cache miss for key: {}", key);
                Ok(None)
            }
        }
    }

    // == Get Or Set ==
    /// Returns the cached value for `key`, or runs `populate` on a miss and
    /// caches a `Some` result under the resolved expiration policy.
    ///
    /// A `None` from `populate` is returned as-is and nothing is written.
    /// Errors from `populate` propagate unchanged; cache failures are converted
    /// with `E::from`.
    pub async fn get_or_set<T, E, F, Fut>(
        &self,
        key: &str,
        populate: F,
        sliding_expiration: Option<Duration>,
        absolute_expiration: Option<Duration>,
    ) -> std::result::Result<Option<T>, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Option<T>, E>>,
    {
        if let Some(cached) = self.get::<T>(key).await? {
            return Ok(Some(cached));
        }

        let Some(value) = populate().await? else {
            debug!("Populate returned nothing for key: {}", key);
            return Ok(None);
        };

        self.set(key, &value, sliding_expiration, absolute_expiration)
            .await?;

        Ok(Some(value))
    }

    // == Set ==
    /// Serializes `value` and writes it under `key`, replacing any existing entry.
    ///
    /// With neither expiration supplied the default pair (60m sliding, 180m
    /// absolute) applies; otherwise only the supplied values do.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        sliding_expiration: Option<Duration>,
        absolute_expiration: Option<Duration>,
    ) -> Result<()> {
        let options = EntryOptions::resolve(sliding_expiration, absolute_expiration);
        let payload = serde_json::to_string(value).map_err(|source| CacheError::Serialization {
            key: key.to_string(),
            source,
        })?;

        self.store
            .set_string(&self.storage_key(key), &payload, &options)
            .await?;

        debug!(
            "Cached key: {} (sliding={:?}, absolute={:?})",
            key, options.sliding_expiration, options.absolute_expiration
        );
        Ok(())
    }

    // == Remove ==
    /// Deletes `key`. Removing an absent key succeeds.
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(&self.storage_key(key)).await?;
        debug!("Removed key: {}", key);
        Ok(())
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }
}
