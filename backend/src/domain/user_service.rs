//! User management domain service.
//!
//! Implements [`UserManagement`] on top of a [`UserRepository`]. The only
//! rule added over plain delegation is the duplicate-email check on create.
//!
//! The check and the subsequent save are two separate store calls with no
//! lock or transaction spanning them, so concurrent creates with one email
//! can both succeed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserManagement, UserRepository, UserServiceError};
use crate::domain::{User, UserId};

/// User service implementing the [`UserManagement`] driving port.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service backed by `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> UserManagement for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, user: User) -> Result<User, UserServiceError> {
        if self.repo.exists_by_email(user.email()).await? {
            warn!(email = %user.email(), "rejecting user with duplicate email");
            return Err(UserServiceError::DuplicateEmail {
                email: user.email().clone(),
            });
        }

        let saved = self.repo.save(user).await?;
        if let Some(id) = saved.id() {
            info!(user_id = %id, "user created");
        }
        Ok(saved)
    }

    async fn get_all(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self.repo.find_all().await?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, UserServiceError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn update(&self, id: UserId, mut user: User) -> Result<User, UserServiceError> {
        // An unknown id is inserted rather than rejected.
        user.assign_id(id.clone());
        let saved = self.repo.save(user).await?;
        info!(user_id = %id, "user saved");
        Ok(saved)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserServiceError> {
        self.repo.delete_by_id(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
