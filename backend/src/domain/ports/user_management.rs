//! Driving port for user CRUD use-cases.
//!
//! Inbound adapters call this port; [`crate::domain::UserService`] is the
//! production implementation.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::UserPersistenceError;

/// Failures surfaced by the user management use-cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserServiceError {
    /// A user with this email already exists; nothing was written.
    #[error("email already exists: {email}")]
    DuplicateEmail { email: EmailAddress },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] UserPersistenceError),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserManagement: Send + Sync {
    /// Create a user, rejecting an email that is already stored.
    async fn create(&self, user: User) -> Result<User, UserServiceError>;

    /// List every user.
    async fn get_all(&self) -> Result<Vec<User>, UserServiceError>;

    /// Look up a user; `None` when the identifier is unknown.
    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, UserServiceError>;

    /// Save `user` under `id`, replacing any identifier on the payload.
    async fn update(&self, id: UserId, user: User) -> Result<User, UserServiceError>;

    /// Delete a user; unknown identifiers are ignored.
    async fn delete(&self, id: &UserId) -> Result<(), UserServiceError>;
}
