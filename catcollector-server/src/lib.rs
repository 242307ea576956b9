//! catcollector-server: the cat collector web application
//!
//! Server-rendered pages for a multi-user cat collection: each user manages
//! their own cats, attaches shared toys and uploaded photos, and records
//! feedings. Domain validation lives in `models`, persistence in `db`,
//! authentication in `auth`, the photo bucket client in `storage`, and the
//! axum server with all page handlers in `http`.

pub mod auth;
pub mod db;
pub mod http;
pub mod models;
pub mod render;
pub mod storage;

pub use http::server::{build_router, run_server, AppState, ServerConfig};
