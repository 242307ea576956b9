//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use catcollector_server::db::create_pool;
use catcollector_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Database URL (overrides the DATABASE_URL environment variable)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// S3-compatible endpoint photo uploads are sent to
    #[arg(
        long,
        env = "CATCOLLECTOR_S3_ENDPOINT",
        default_value = "https://s3.us-east-1.amazonaws.com"
    )]
    pub storage_endpoint: String,

    /// Bucket that stores uploaded photos
    #[arg(long, env = "CATCOLLECTOR_S3_BUCKET", default_value = "catcollector")]
    pub storage_bucket: String,

    /// Bearer token for gateway-style storage deployments
    #[arg(long, env = "CATCOLLECTOR_S3_TOKEN", hide_env_values = true)]
    pub storage_token: Option<String>,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    pub static_dir: String,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args.database_url.context(
        "DATABASE_URL not set. Pass --database-url or export DATABASE_URL \
         (e.g. postgres://localhost/catcollector)",
    )?;

    tracing::info!("Starting catcollector server on {}", args.bind);

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        storage_endpoint: args.storage_endpoint,
        storage_bucket: args.storage_bucket,
        storage_token: args.storage_token,
        static_dir: args.static_dir,
    };

    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
