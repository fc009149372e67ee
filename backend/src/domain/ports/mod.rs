//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_management;
mod user_repository;

#[cfg(test)]
pub use user_management::MockUserManagement;
pub use user_management::{UserManagement, UserServiceError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
