//! Server settings and the builder-style configuration handed to
//! [`super::create_server`].

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DbPool, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings loaded from CLI flags, `USERAPP_*` environment variables, and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERAPP")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps users in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving; defaults to `true`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Whether to apply embedded migrations on start.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE)),
        )
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database pool; users are then stored in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether a database pool is attached.
    #[must_use]
    pub fn uses_database(&self) -> bool {
        self.db_pool.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "USERAPP_BIND_ADDR",
        "USERAPP_DATABASE_URL",
        "USERAPP_POOL_MAX_SIZE",
        "USERAPP_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("userapp")]).expect("config should load")
    }

    #[rstest]
    fn defaults_select_in_memory_store() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.pool_config().is_none());
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERAPP_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "USERAPP_DATABASE_URL",
                Some("postgres://localhost/users".to_owned()),
            ),
            ("USERAPP_POOL_MAX_SIZE", Some("4".to_owned())),
            ("USERAPP_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9090
        );
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/users");
        assert_eq!(pool.max_size(), 4);
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([("USERAPP_BIND_ADDR", Some("not-an-addr".to_owned()))]);

        assert!(load_from_empty_args().bind_addr().is_err());
    }

    #[rstest]
    fn server_config_defaults_to_memory_store() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal");
        let config = ServerConfig::new(addr);

        assert_eq!(config.bind_addr(), addr);
        assert!(!config.uses_database());
    }
}
