#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use bugtrack_api::config::{LogFormat, ServerConfig, StoreBackend};
use bugtrack_api::router::build_app_router;
use bugtrack_api::state::AppState;
use bugtrack_db::store::InMemoryBugStore;

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_PASSWORD: &str = "secret-password";

fn server_config() -> ServerConfig {
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

/// Serve `app` on an ephemeral port; returns the `/api` base URL.
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// The real API over a fresh in-memory store.
pub async fn spawn_api() -> (String, Arc<InMemoryBugStore>) {
    let store = Arc::new(InMemoryBugStore::new());
    let state = AppState {
        store: store.clone(),
    };
    (serve(build_app_router(state, &server_config())).await, store)
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

fn user() -> Value {
    json!({ "id": "u1", "name": "Jane Doe", "email": "jane@example.com" })
}

fn unauthorized(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": message })),
    )
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == TEST_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "success": true, "data": { "token": TEST_TOKEN, "user": user() } })),
        )
    } else {
        unauthorized("Invalid credentials")
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "User already exists" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": { "token": TEST_TOKEN } })),
    )
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (StatusCode::OK, Json(json!({ "success": true, "data": user() })))
    } else {
        unauthorized("Not authorized")
    }
}

async fn profile(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized("Not authorized");
    }
    let mut updated = user();
    if let Some(name) = body.get("name") {
        updated["name"] = name.clone();
    }
    (StatusCode::OK, Json(json!({ "success": true, "data": updated })))
}

async fn password(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized("Not authorized");
    }
    if body["currentPassword"] != TEST_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Current password is incorrect" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Password updated" })),
    )
}

async fn logout() -> Json<Value> {
    Json(json!({ "success": true, "message": "Logged out" }))
}

/// Minimal `/api/auth` server with one account and one valid token.
pub async fn spawn_auth_stub() -> String {
    let auth = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/profile", put(profile))
        .route("/password", put(password))
        .route("/logout", post(logout));

    serve(Router::new().nest("/api/auth", auth)).await
}

fn stub_bug(id: i64, body: &Value) -> Value {
    json!({
        "id": id,
        "title": body["title"],
        "description": body["description"],
        "status": body["status"],
        "priority": body["priority"],
        "reporter": body["reporter"],
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z",
    })
}

async fn list_unavailable() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "An internal error occurred", "code": "INTERNAL_ERROR" })),
    )
}

async fn stub_create(
    State(writes): State<Arc<AtomicUsize>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    writes.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": stub_bug(7, &body), "message": "Bug reported successfully" })),
    )
}

async fn stub_update(
    State(writes): State<Arc<AtomicUsize>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    writes.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "success": true, "data": stub_bug(id, &body), "message": "Bug updated successfully" }))
}

async fn stub_delete(State(writes): State<Arc<AtomicUsize>>) -> Json<Value> {
    writes.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "success": true, "message": "Bug deleted successfully" }))
}

/// Bug server whose writes succeed while every list read fails with a 500.
/// Returns the base URL and a counter of accepted writes.
pub async fn spawn_failing_list_stub() -> (String, Arc<AtomicUsize>) {
    let writes = Arc::new(AtomicUsize::new(0));
    let bugs = Router::new()
        .route("/", get(list_unavailable).post(stub_create))
        .route("/{id}", put(stub_update).delete(stub_delete))
        .with_state(writes.clone());

    (serve(Router::new().nest("/api/bugs", bugs)).await, writes)
}
