//! Redis-based distributed cache store.
//!
//! Each entry is a hash holding the payload and its expiration metadata:
//!
//! | field    | value                                            |
//! |----------|--------------------------------------------------|
//! | `data`   | serialized payload                               |
//! | `absexp` | absolute deadline in unix milliseconds, or -1    |
//! | `sldexp` | sliding window in milliseconds, or -1            |
//!
//! The key's TTL always mirrors the effective expiration, so Redis itself
//! evicts the entry. Reads refresh the TTL when a sliding window is set.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use crate::cache::{CacheError, DistributedCache, EntryOptions, Result};

const DATA_FIELD: &str = "data";
const ABSOLUTE_FIELD: &str = "absexp";
const SLIDING_FIELD: &str = "sldexp";

/// Marker for an unset expiration component.
const NOT_PRESENT: i64 = -1;

/// Largest TTL handed to PEXPIRE. Redis rejects expire times whose deadline
/// overflows its millisecond clock.
const MAX_TTL_MILLIS: i64 = i64::MAX / 4;

/// Redis-backed cache store.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis using a connection string such as `redis://127.0.0.1:6379`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::StoreUnavailable(format!("Invalid Redis URL: {}", e)))?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        info!("Connected to Redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl DistributedCache for RedisStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();

        let (data, absolute_at, sliding): (Option<String>, Option<i64>, Option<i64>) =
            redis::cmd("HMGET")
                .arg(key)
                .arg(DATA_FIELD)
                .arg(ABSOLUTE_FIELD)
                .arg(SLIDING_FIELD)
                .query_async(&mut conn)
                .await
                .map_err(|e| {
                    CacheError::StoreUnavailable(format!("Failed to get key '{}': {}", key, e))
                })?;

        let Some(data) = data else {
            return Ok(None);
        };

        if let Some(ttl) = sliding_refresh(absolute_at, sliding, now_millis()) {
            let _: () = redis::cmd("PEXPIRE")
                .arg(key)
                .arg(ttl)
                .query_async(&mut conn)
                .await
                .map_err(|e| {
                    CacheError::StoreUnavailable(format!("Failed to refresh key '{}': {}", key, e))
                })?;
            debug!("Refreshed sliding expiration for key '{}' to {}ms", key, ttl);
        }

        Ok(Some(data))
    }

    async fn set_string(&self, key: &str, value: &str, options: &EntryOptions) -> Result<()> {
        let mut conn = self.conn.clone();
        let pipe = write_pipeline(key, value, options, now_millis());

        let _: () = pipe.query_async(&mut conn).await.map_err(|e| {
            CacheError::StoreUnavailable(format!("Failed to set key '{}': {}", key, e))
        })?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        let _: () = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                CacheError::StoreUnavailable(format!("Failed to delete key '{}': {}", key, e))
            })?;

        Ok(())
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Atomic write: replace the hash, then mirror the effective TTL on the key.
fn write_pipeline(key: &str, value: &str, options: &EntryOptions, now_ms: i64) -> redis::Pipeline {
    let (absolute_at, sliding) = expiration_fields(options, now_ms);

    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("DEL")
        .arg(key)
        .ignore()
        .cmd("HSET")
        .arg(key)
        .arg(ABSOLUTE_FIELD)
        .arg(absolute_at)
        .arg(SLIDING_FIELD)
        .arg(sliding)
        .arg(DATA_FIELD)
        .arg(value)
        .ignore();

    match ttl_millis(absolute_at, sliding, now_ms) {
        Some(ttl) => pipe.cmd("PEXPIRE").arg(key).arg(ttl).ignore(),
        None => pipe.cmd("PERSIST").arg(key).ignore(),
    };

    pipe
}

/// TTL to reset on a hit, given the stored `absexp`/`sldexp` fields.
///
/// Only entries with a sliding window are refreshed. Missing fields count as unset.
fn sliding_refresh(absolute_at: Option<i64>, sliding: Option<i64>, now_ms: i64) -> Option<i64> {
    let sliding = sliding.unwrap_or(NOT_PRESENT);
    if sliding == NOT_PRESENT {
        return None;
    }

    ttl_millis(absolute_at.unwrap_or(NOT_PRESENT), sliding, now_ms)
}

/// Hash field values `(absexp, sldexp)` for a write at `now_ms`.
fn expiration_fields(options: &EntryOptions, now_ms: i64) -> (i64, i64) {
    let absolute_at = options
        .absolute_expiration
        .map_or(NOT_PRESENT, |ttl| now_ms.saturating_add(duration_millis(ttl)));
    let sliding = options
        .sliding_expiration
        .map_or(NOT_PRESENT, duration_millis);

    (absolute_at, sliding)
}

/// Key TTL for the stored metadata at `now_ms`, or None if the entry never expires.
///
/// The sliding window is capped by whatever is left of the absolute deadline,
/// and the result never exceeds `MAX_TTL_MILLIS`.
fn ttl_millis(absolute_at: i64, sliding: i64, now_ms: i64) -> Option<i64> {
    let remaining_absolute =
        (absolute_at != NOT_PRESENT).then(|| absolute_at.saturating_sub(now_ms).max(0));
    let sliding = (sliding != NOT_PRESENT).then_some(sliding);

    let ttl = match (sliding, remaining_absolute) {
        (Some(sliding), Some(remaining)) => sliding.min(remaining),
        (Some(ttl), None) | (None, Some(ttl)) => ttl,
        (None, None) => return None,
    };

    Some(ttl.min(MAX_TTL_MILLIS))
}

fn duration_millis(duration: std::time::Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
