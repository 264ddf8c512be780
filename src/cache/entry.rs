//! Cache Entry Module
//!
//! Defines the in-memory entry with sliding and absolute expiration.

use std::time::{Duration, Instant};

use crate::cache::EntryOptions;

// == Cache Entry ==
/// A stored payload plus the timestamps needed to evaluate its expiration.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The serialized value
    pub value: String,
    /// Last time the entry was written or read
    pub last_access: Instant,
    /// Sliding window measured from `last_access`
    pub sliding: Option<Duration>,
    /// Hard deadline fixed at write time, None = no absolute cap
    pub absolute_deadline: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `now` under the given policy.
    ///
    /// An absolute expiration too large to represent as an `Instant` leaves
    /// the entry without an absolute cap.
    pub fn new(value: String, options: &EntryOptions, now: Instant) -> Self {
        Self {
            value,
            last_access: now,
            sliding: options.sliding_expiration,
            absolute_deadline: options
                .absolute_expiration
                .and_then(|ttl| now.checked_add(ttl)),
        }
    }

    // == Expires At ==
    /// Effective expiration instant: the earlier of the sliding deadline and
    /// the absolute deadline. None when neither is set. A sliding window that
    /// overflows `Instant` does not constrain the entry.
    pub fn expires_at(&self) -> Option<Instant> {
        let sliding_deadline = self
            .sliding
            .and_then(|window| self.last_access.checked_add(window));

        match (sliding_deadline, self.absolute_deadline) {
            (Some(sliding), Some(absolute)) => Some(sliding.min(absolute)),
            (Some(deadline), None) | (None, Some(deadline)) => Some(deadline),
            (None, None) => None,
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` reaches its effective expiration.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at() {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Touch ==
    /// Restarts the sliding window. The absolute deadline is unaffected, so
    /// `expires_at` never moves past it.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }
}
