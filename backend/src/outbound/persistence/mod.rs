//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Users are stored as JSONB documents keyed by id, with the email promoted to
//! an indexed column for the uniqueness probe. Connections come from a `bb8`
//! pool through `diesel-async`; schema changes ship as embedded migrations.
//!
//! Row structs (`models.rs`) and the table definition (`schema.rs`) stay
//! private to this module.
//!
//! # Example
//!
//! ```ignore
//! use userapp::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
