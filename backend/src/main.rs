//! Server entry-point: loads settings, selects the user store, and serves the
//! REST API.

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use userapp::inbound::http::health::HealthState;
use userapp::outbound::persistence::{DbPool, run_migrations_blocking};
use userapp::server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;
    let mut config = ServerConfig::new(bind_addr);

    match (settings.pool_config(), settings.database_url.clone()) {
        (Some(pool_config), Some(database_url)) => {
            if settings.run_migrations() {
                let applied = run_migrations_blocking(database_url).await?;
                info!(applied, "database migrations applied");
            }
            let pool = DbPool::new(pool_config).await?;
            config = config.with_db_pool(pool);
        }
        _ => warn!("no database configured; users are kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
