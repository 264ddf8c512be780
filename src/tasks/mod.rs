//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweep: removes expired entries from the in-memory store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
