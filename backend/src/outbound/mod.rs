//! Outbound adapters implementing the [`UserRepository`] port.
//!
//! - **memory**: process-local store, used when no database is configured.
//! - **persistence**: PostgreSQL-backed store using Diesel ORM.
//!
//! [`UserRepository`]: crate::domain::ports::UserRepository

pub mod memory;
pub mod persistence;
