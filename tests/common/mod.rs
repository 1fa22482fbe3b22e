//! Shared helpers for endpoint tests.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use std::sync::Arc;
use taskforge::api::{AppState, router};
use taskforge::identity::adapters::memory::InMemoryUserRepository;
use taskforge::task::adapters::memory::{
    InMemoryTaskEventRepository, InMemoryTaskRepository, RecordingHistoryMailer,
};
use taskforge::task::ports::HistoryMailer;
use tower::ServiceExt;

/// An app wired over in-memory adapters, with the recording mailer exposed.
pub struct TestApp {
    /// The routed application under test.
    pub router: Router,
    /// Captures task-history emails instead of delivering them.
    pub mailer: Arc<RecordingHistoryMailer>,
}

/// Builds a fresh application over empty in-memory storage.
pub fn test_app() -> TestApp {
    let mailer = Arc::new(RecordingHistoryMailer::new());
    let mailer_port: Arc<dyn HistoryMailer> = mailer.clone();
    let state = AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryTaskEventRepository::new()),
        mailer_port,
    );
    TestApp {
        router: router(state),
        mailer,
    }
}

/// Sends a JSON request and returns the status plus the parsed body.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(actor_id) = actor {
        builder = builder.header("X-Actor-Id", actor_id);
    }

    let request = builder
        .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
        .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should route");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}

/// Seeds a user through the admin endpoint.
pub async fn seed_user(app: &Router, id: &str, role: &str, status: &str) {
    let (created, body) = send_json(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(serde_json::json!({
            "id": id,
            "email": format!("{id}@example.com"),
            "nickname": format!("nick_{id}"),
            "first_name": "Test",
            "last_name": "User",
            "role": role,
            "status": status,
        })),
    )
    .await;
    assert_eq!(created, StatusCode::CREATED, "seed failed: {body}");
}
