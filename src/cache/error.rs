//! Errors surfaced by the cache accessor and its stores.

use thiserror::Error;

// == Cache Error Enum ==
/// Failure talking to or decoding from the distributed cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Connection, timeout or protocol failure in the backing store
    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored payload does not match the requested type
    #[error("Corrupt cache entry for key '{key}': {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded for storage
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, CacheError>;
