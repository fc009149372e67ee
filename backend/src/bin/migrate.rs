//! Apply the embedded database migrations and exit.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use userapp::outbound::persistence::run_migrations;

/// `migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "migrate",
    about = "Apply pending userapp database migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `USERAPP_DATABASE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    explicit
        .or_else(|| env::var("USERAPP_DATABASE_URL").ok())
        .or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| eyre!("no database URL: pass --database-url or set USERAPP_DATABASE_URL"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url)?;
    let applied = run_migrations(&database_url)?;
    info!(applied, "migrations complete");
    println!("applied {applied} migration(s)");
    Ok(())
}
