#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bugtrack_api::config::{LogFormat, ServerConfig, StoreBackend};
use bugtrack_api::router::build_app_router;
use bugtrack_api::state::AppState;
use bugtrack_db::store::InMemoryBugStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        store_backend: StoreBackend::Memory,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over `store`, through the same
/// `build_app_router` the binary uses.
pub fn build_test_app_with(store: Arc<InMemoryBugStore>) -> Router {
    let state = AppState { store };
    build_app_router(state, &test_config())
}

/// Fresh app plus a handle on its store for seeding and inspection.
pub fn build_test_app() -> (Router, Arc<InMemoryBugStore>) {
    let store = Arc::new(InMemoryBugStore::new());
    (build_test_app_with(Arc::clone(&store)), store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PUT, uri, body).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A payload that passes every rule of the validation chain.
pub fn valid_bug() -> serde_json::Value {
    serde_json::json!({
        "title": "New Test Bug",
        "description": "This is a detailed description of the new test bug",
        "status": "open",
        "priority": "medium",
        "reporter": "Jane Doe"
    })
}
