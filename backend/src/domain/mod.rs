//! Domain primitives, ports, and services.
//!
//! Purpose: define the user document model and the CRUD use-cases without
//! depending on HTTP or storage frameworks. Adapters live under
//! [`crate::inbound`] and [`crate::outbound`].
//!
//! Public surface:
//! - `Error`, `ErrorCode`: transport-agnostic error payload.
//! - `User`, `UserId`, `EmailAddress`, `UserAttributes`: the user document.
//! - `UserService`: implementation of the `UserManagement` driving port.
//! - `TraceId`: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserAttributes, UserId, UserValidationError};
pub use self::user_service::UserService;
