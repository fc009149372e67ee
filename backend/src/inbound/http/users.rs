//! User CRUD handlers.
//!
//! ```text
//! POST   /api/users       {"email":"a@x.com","name":"Ada"}
//! GET    /api/users
//! GET    /api/users/{id}
//! PUT    /api/users/{id}  {"email":"b@x.com"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Register the user routes and their JSON body configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use userapp::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api").configure(users::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

/// JSON extractor settings reporting malformed bodies as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "invalid_body" }))
            .into()
    })
}

fn parse_id(raw: String) -> ApiResult<UserId> {
    UserId::new(raw).map_err(Error::from)
}

/// Create a user; the email must not already be stored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already exists", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<User>,
) -> ApiResult<HttpResponse> {
    let created = state.users.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List every stored user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.get_all().await?))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "No user with this identifier", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(path.into_inner())?;
    match state.users.get_by_id(&id).await? {
        Some(user) => Ok(web::Json(user)),
        None => Err(Error::not_found(format!("user {id} not found"))),
    }
}

/// Save the payload under the path identifier, inserting it when unknown.
///
/// Email uniqueness is not re-checked here.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserSchema,
    responses(
        (status = 200, description = "User saved", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<User>,
) -> ApiResult<web::Json<User>> {
    let id = parse_id(path.into_inner())?;
    let saved = state.users.update(id, payload.into_inner()).await?;
    Ok(web::Json(saved))
}

/// Delete a user; unknown identifiers still return 204.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted or absent"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner())?;
    state.users.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
