//! Authentication module for managing user accounts.
//!
//! This module provides the public interface for login and registration
//! against the local credential store. The session token it hands out is a
//! static placeholder; no route checks it.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use models::*;
pub use routes::*;
pub use service::*;
