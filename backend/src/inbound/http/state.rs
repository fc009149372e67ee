//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! [`UserManagement`] port, so they can be tested against mocks.

use std::sync::Arc;

use crate::domain::ports::UserManagement;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserManagement>,
}

impl HttpState {
    /// Construct state from a user management implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use userapp::domain::UserService;
    /// use userapp::inbound::http::state::HttpState;
    /// use userapp::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
    /// let state = HttpState::new(Arc::new(service));
    /// # let _ = state;
    /// ```
    pub fn new(users: Arc<dyn UserManagement>) -> Self {
        Self { users }
    }
}
