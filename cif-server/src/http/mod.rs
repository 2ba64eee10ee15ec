//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod form;
pub mod routes;
pub mod server;

pub use error::{ApiError, Operation};
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
