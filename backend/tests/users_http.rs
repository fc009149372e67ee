//! End-to-end HTTP tests against the assembled application with the
//! in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};

use userapp::domain::{TRACE_ID_HEADER, UserService};
use userapp::inbound::http::health::HealthState;
use userapp::inbound::http::state::HttpState;
use userapp::outbound::memory::InMemoryUserRepository;
use userapp::server::build_app;

fn http_state() -> web::Data<HttpState> {
    let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
    web::Data::new(HttpState::new(Arc::new(service)))
}

#[actix_web::test]
async fn crud_lifecycle_over_http() {
    let app = test::init_service(build_app(web::Data::new(HealthState::new()), http_state())).await;

    let create = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "email": "a@x.com", "name": "Ada" }))
        .to_request();
    let res = test::call_service(&app, create).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("id assigned").to_owned();

    let duplicate = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let res = test::call_service(&app, duplicate).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let trace_header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"].as_str().map(str::to_owned), trace_header);

    let list = test::TestRequest::get().uri("/api/users").to_request();
    let users: Vec<Value> = test::call_and_read_body_json(&app, list).await;
    assert_eq!(users.len(), 1);

    let update = test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .set_json(json!({ "email": "b@x.com" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, update).await;
    assert_eq!(updated, json!({ "id": id, "email": "b@x.com" }));

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, delete).await.status(),
        StatusCode::NO_CONTENT
    );

    let fetch = test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request();
    let res = test::call_service(&app, fetch).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn malformed_json_is_rejected_with_invalid_request() {
    let app = test::init_service(build_app(web::Data::new(HealthState::new()), http_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn readiness_reflects_health_state() {
    let health = web::Data::new(HealthState::new());
    let app = test::init_service(build_app(health.clone(), http_state())).await;

    let probe = || test::TestRequest::get().uri("/health/ready").to_request();
    assert_eq!(
        test::call_service(&app, probe()).await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );

    health.mark_ready();
    assert_eq!(
        test::call_service(&app, probe()).await.status(),
        StatusCode::OK
    );
}
