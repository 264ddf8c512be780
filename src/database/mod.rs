//! Database Module
//!
//! Simulated data source that the cache sits in front of. Every query sleeps
//! for a fixed latency so cache hits and misses are easy to tell apart.

mod simulated;

pub use simulated::{Latency, SimulatedDatabase};
