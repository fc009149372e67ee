//! In-process document store for users.
//!
//! Keeps every user document in insertion order behind a read/write lock.
//! Used when no database is configured and by integration tests. Each
//! operation takes the lock once, so single-document writes are atomic but
//! nothing spans two calls.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId};

/// In-memory implementation of the [`UserRepository`] port.
///
/// # Examples
/// ```
/// use userapp::domain::User;
/// use userapp::domain::ports::UserRepository;
/// use userapp::outbound::memory::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::new();
/// let saved = repo
///     .save(User::from_email("a@x.com"))
///     .await
///     .expect("save succeeds");
/// assert!(saved.id().is_some());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    documents: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::query("in-memory user store lock poisoned")
}

fn has_id(user: &User, id: &UserId) -> bool {
    user.id() == Some(id)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: User) -> Result<User, UserPersistenceError> {
        let user = match user.id() {
            Some(_) => user,
            None => user.with_id(UserId::random()),
        };
        let Some(id) = user.id().cloned() else {
            return Err(UserPersistenceError::query("saved user lacks an identifier"));
        };

        let mut documents = self.documents.write().map_err(poisoned)?;
        match documents.iter_mut().find(|stored| has_id(stored, &id)) {
            Some(stored) => {
                debug!(user_id = %id, "overwriting user document");
                *stored = user.clone();
            }
            None => {
                debug!(user_id = %id, "inserting user document");
                documents.push(user.clone());
            }
        }
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.iter().find(|user| has_id(user, id)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.clone())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.retain(|user| !has_id(user, id));
        Ok(())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let documents = self.documents.read().map_err(poisoned)?;
        Ok(documents.iter().any(|user| user.email() == email))
    }
}
