//! Request, response and domain models for the HTTP API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, and the records
//! served from the simulated database and stored in the cache.

pub mod domain;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use domain::{ComplexData, Product, User};
pub use requests::CreateProductRequest;
pub use responses::{ErrorResponse, HealthResponse, MessageResponse};
