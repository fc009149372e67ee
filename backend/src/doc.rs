//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user CRUD and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`]. The document backs
//! Swagger UI in debug builds and `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "userapp API",
        description = "CRUD over user documents with email uniqueness checked at creation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "User document management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
