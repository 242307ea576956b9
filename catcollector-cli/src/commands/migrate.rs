//! Database migration command
//!
//! `serve` already migrates at boot; this exists for provisioning a database
//! ahead of a deploy or from a host that never runs the server itself.

use anyhow::{Context, Result};
use clap::Parser;

use catcollector_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides the DATABASE_URL environment variable)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Apply database migrations and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args.database_url.context(
        "DATABASE_URL not set. Pass --database-url or export DATABASE_URL \
         (e.g. postgres://localhost/catcollector)",
    )?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply migrations")?;

    tracing::info!("Database schema is up to date");
    Ok(())
}
