//! Builds the HTTP state from the configured store backend.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::domain::UserService;
use crate::domain::ports::UserManagement;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Wire [`UserService`] over PostgreSQL when a pool is configured, otherwise
/// over the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users: Arc<dyn UserManagement> = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "user store selected");
            Arc::new(UserService::new(Arc::new(DieselUserRepository::new(
                pool.clone(),
            ))))
        }
        None => {
            info!(store = "memory", "user store selected");
            Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())))
        }
    };
    web::Data::new(HttpState::new(users))
}
