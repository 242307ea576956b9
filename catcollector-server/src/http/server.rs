//! Axum server setup
//!
//! Server skeleton with:
//! - Migrations run at boot
//! - Embedded template registry shared through state
//! - Static assets under /static
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use handlebars::Handlebars;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::render;
use crate::storage::{ObjectStore, S3LikeStore};

use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// S3-compatible endpoint photo uploads are PUT against
    pub storage_endpoint: String,

    /// Bucket name under the endpoint
    pub storage_bucket: String,

    /// Optional bearer token for gateway-style storage deployments
    pub storage_token: Option<String>,

    /// Directory served under /static
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            storage_endpoint: "https://s3.us-east-1.amazonaws.com".into(),
            storage_bucket: "catcollector".into(),
            storage_token: None,
            static_dir: "static".into(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub store: Arc<dyn ObjectStore>,
    pub templates: Handlebars<'static>,
}

/// Build the application router for the given state.
///
/// Kept separate from [`run_server`] so tests can drive the router
/// directly with an in-memory object store.
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .merge(routes::pages::router())
        .merge(routes::health::router())
        .merge(routes::accounts::router())
        .merge(routes::cats::router())
        .merge(routes::feedings::router())
        .merge(routes::photos::router())
        .merge(routes::toys::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let config = ServerConfig::default();
/// run_server(pool, config).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    crate::db::migrations::run(&pool).await?;

    let templates = render::build_registry()?;
    let store: Arc<dyn ObjectStore> = Arc::new(
        S3LikeStore::new(
            config.storage_endpoint.clone(),
            config.storage_bucket.clone(),
        )
        .with_bearer_token(config.storage_token.clone()),
    );
    tracing::info!(
        endpoint = %config.storage_endpoint,
        bucket = %config.storage_bucket,
        "Photo storage configured"
    );

    let state = Arc::new(AppState {
        pool,
        store,
        templates,
    });
    let app = build_router(state, &config.static_dir);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("template error: {0}")]
    Render(#[from] render::RenderError),
}
