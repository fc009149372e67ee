//! Embedded Diesel migrations for the users table.
//!
//! Migrations run over a synchronous `PgConnection`, so the async entry point
//! moves the work onto Tokio's blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations from `backend/migrations`, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration, returning how many ran.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying fails.
pub fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

/// Async wrapper around [`run_migrations`].
///
/// # Errors
///
/// Returns [`MigrationError`] when migrations fail or the blocking task
/// cannot complete.
pub async fn run_migrations_blocking(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Apply {
            message: format!("migration task failed: {err}"),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;

    #[test]
    fn users_migration_is_embedded() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).expect("embedded migrations");
        assert!(
            migrations
                .iter()
                .any(|migration| migration.name().to_string().contains("create_users")),
            "users migration should be embedded"
        );
    }
}
