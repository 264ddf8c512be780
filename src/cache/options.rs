//! Entry Options Module
//!
//! Sliding/absolute expiration policy attached to every cache write.

use std::time::Duration;

// == Defaults ==
/// Sliding expiration applied when a write supplies no expiration at all.
pub const DEFAULT_SLIDING_EXPIRATION: Duration = Duration::from_secs(60 * 60);

/// Absolute expiration applied when a write supplies no expiration at all.
pub const DEFAULT_ABSOLUTE_EXPIRATION: Duration = Duration::from_secs(180 * 60);

// == Entry Options ==
/// Expiration policy for a single cache entry.
///
/// - `sliding_expiration`: lifetime measured from the last read, reset on each hit
/// - `absolute_expiration`: hard lifetime measured from the write, never extended
///
/// A `None` component does not constrain the entry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOptions {
    pub sliding_expiration: Option<Duration>,
    pub absolute_expiration: Option<Duration>,
}

impl EntryOptions {
    // == Resolve ==
    /// Resolves per-call overrides into the effective policy.
    ///
    /// When both overrides are `None` the global default pair is used.
    /// Otherwise only the supplied overrides apply; the missing one stays unset
    /// rather than falling back to its default.
    pub fn resolve(sliding: Option<Duration>, absolute: Option<Duration>) -> Self {
        if sliding.is_none() && absolute.is_none() {
            return Self::default();
        }

        Self {
            sliding_expiration: sliding,
            absolute_expiration: absolute,
        }
    }

    /// Policy with no expiration at all.
    pub fn never() -> Self {
        Self {
            sliding_expiration: None,
            absolute_expiration: None,
        }
    }
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            sliding_expiration: Some(DEFAULT_SLIDING_EXPIRATION),
            absolute_expiration: Some(DEFAULT_ABSOLUTE_EXPIRATION),
        }
    }
}
