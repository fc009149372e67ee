//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa derives. These wrappers mirror their
//! serialized shape and register under the domain type names.

use utoipa::ToSchema;

/// Machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored state, e.g. a duplicate email.
    #[schema(rename = "conflict")]
    Conflict,
    /// The user store cannot be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error payload.
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    #[schema(example = "a user with email a@x.com already exists")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. the offending field.
    details: Option<serde_json::Value>,
}

/// User document. Any additional top-level fields are stored and returned
/// unchanged alongside `id` and `email`.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier; ignored on update in favour of the path.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: Option<String>,
    /// Contact email, compared byte-for-byte; unique at creation time.
    #[schema(example = "a@x.com")]
    email: String,
}
