//! HTTP layer
//!
//! Axum server with:
//! - Cookie-session authentication
//! - Server-rendered HTML pages
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::PageError;
pub use server::{build_router, run_server, AppState, ServerConfig};
