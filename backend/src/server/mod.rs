//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use state_builders::build_http_state;

/// Assemble the application: `/api` user routes, health probes, and the
/// trace middleware. Swagger UI is mounted at `/docs` in debug builds.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::web;
/// use userapp::domain::UserService;
/// use userapp::inbound::http::health::HealthState;
/// use userapp::inbound::http::state::HttpState;
/// use userapp::outbound::memory::InMemoryUserRepository;
/// use userapp::server::build_app;
///
/// let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
/// let _app = build_app(
///     web::Data::new(HealthState::new()),
///     web::Data::new(HttpState::new(Arc::new(service))),
/// );
/// ```
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api").configure(users::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind an Actix server for `config` and mark `health_state` ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
