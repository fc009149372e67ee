//! Driven port for user document persistence.
//!
//! Adapters translate these five operations into calls against a document
//! store. Absence is a normal outcome (`Ok(None)`, or a no-op for deletes);
//! only store faults surface as [`UserPersistenceError`].

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Upsert a user document.
    ///
    /// Inserts when `user.id()` is `None`, assigning a fresh identifier;
    /// otherwise overwrites the record with that identifier, creating it if
    /// it does not exist yet. The returned user always carries an id.
    async fn save(&self, user: User) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every stored user in adapter-defined order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Remove a user; removing an unknown identifier is not an error.
    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError>;

    /// Report whether any stored user has exactly this email.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;
}
