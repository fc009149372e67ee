//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::ports::{UserPersistenceError, UserServiceError};
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, UserValidationError};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<UserServiceError> for Error {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::DuplicateEmail { email } => {
                Error::conflict(format!("a user with email {email} already exists"))
                    .with_details(json!({ "field": "email", "code": "duplicate_email" }))
            }
            UserServiceError::Store(UserPersistenceError::Connection { message }) => {
                error!(%message, "user store unavailable");
                Error::service_unavailable("user store is unavailable")
            }
            UserServiceError::Store(UserPersistenceError::Query { message }) => {
                error!(%message, "user store query failed");
                Error::internal(message)
            }
        }
    }
}

impl From<UserValidationError> for Error {
    fn from(err: UserValidationError) -> Self {
        let (field, code) = match &err {
            UserValidationError::EmptyId => ("id", "empty_id"),
            UserValidationError::InvalidId => ("id", "invalid_id"),
            UserValidationError::ReservedAttribute { .. } => ("attributes", "reserved_attribute"),
        };
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": field, "code": code }))
    }
}
