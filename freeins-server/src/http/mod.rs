//! HTTP layer
//!
//! Axum server with:
//! - CORS (any origin by default, or an explicit list)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{router, run_server, AppState, CorsPolicy, ServerConfig, ServerError};
