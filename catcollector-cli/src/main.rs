//! catcollector - a multi-collector cat registry with a web face
//!
//! The binary wraps two operations: running the HTTP server and applying
//! database migrations by hand. Everything else lives in `catcollector-server`.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "catcollector",
    author,
    version,
    about = "Cat collection web application",
    long_about = "Runs the cat collector web application: collectors sign up, keep a \
                  register of their cats, log feedings, upload photos to object \
                  storage, and share a common chest of toys."
)]
struct Cli {
    /// Log debug detail (an explicit RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
    /// Apply database migrations and exit
    Migrate(commands::MigrateArgs),
}

fn init_tracing(debug: bool) -> Result<()> {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    }
}
