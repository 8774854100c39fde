//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router (with the production middleware
//! stack) over a test pool and provides request helpers driving it through
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use studygroup_api::config::ServerConfig;
use studygroup_api::router::build_app_router;
use studygroup_api::state::AppState;
use studygroup_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Send a request through a clone of the app.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// GET without identity headers.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with `X-User` / `X-Role` identity headers.
pub async fn get_as(app: &Router, uri: &str, user: &str, role: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("X-User", user)
        .header("X-Role", role)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a multipart upload to `/api/groups/import` as the given actor.
pub async fn import_file(
    app: &Router,
    user: &str,
    role: &str,
    filename: &str,
    content_type: &str,
    content: &[u8],
) -> Response<Body> {
    let boundary = "x-test-boundary-7MA4YWxkTrZu0gW";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/groups/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header("X-User", user)
        .header("X-Role", role)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A well-formed group record as a JSON value.
pub fn group_json(name: &str, x: f64, y: i32, passport: Option<&str>) -> serde_json::Value {
    let mut admin = serde_json::json!({
        "name": "Ann",
        "eyeColor": "GREEN",
        "hairColor": "BLACK",
    });
    if let Some(passport) = passport {
        admin["passportID"] = serde_json::Value::from(passport);
    }
    serde_json::json!({
        "name": name,
        "coordinates": {"x": x, "y": y},
        "studentsCount": 20,
        "expelledStudents": 1,
        "transferredStudents": 2,
        "shouldBeExpelled": 1,
        "averageMark": 4.5,
        "semesterEnum": "THIRD",
        "groupAdmin": admin,
    })
}
