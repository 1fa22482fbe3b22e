//! Endpoint tests for the task lifecycle routes.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "JSON value indexing yields null rather than panicking"
)]

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

mod common;

use common::{TestApp, seed_user, send_json, test_app};

async fn ready_app() -> TestApp {
    let app = test_app();
    seed_user(&app.router, "u1", "USER", "ACTIVE").await;
    seed_user(&app.router, "u2", "USER", "ACTIVE").await;
    seed_user(&app.router, "m1", "MANAGER", "ACTIVE").await;
    app
}

async fn create_task(app: &TestApp, actor: &str, title: &str) -> Value {
    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/tasks",
        Some(actor),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

fn task_id(task: &Value) -> String {
    task["id"].as_str().expect("task id should be a string").to_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn health_endpoint_responds() {
    let app = test_app();

    let (status, body) = send_json(&app.router, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn task_routes_require_the_actor_header() {
    let app = ready_app().await;

    let (status, body) = send_json(&app.router, Method::GET, "/api/tasks", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Missing X-Actor-Id header"));
}

#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_use_defaults_and_appear_in_lists() {
    let app = ready_app().await;

    let task = create_task(&app, "u1", "Buy milk").await;
    assert_eq!(task["status"], json!("NEW"));
    assert_eq!(task["priority"], json!("NORMAL"));
    assert_eq!(task["assignee_id"], Value::Null);
    assert_eq!(task["owner_id"], json!("u1"));
    assert_eq!(task["is_deleted"], json!(false));

    let (status, listed) = send_json(&app.router, Method::GET, "/api/tasks", Some("u2"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_titles_are_rejected() {
    let app = ready_app().await;

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/tasks",
        Some("u1"),
        Some(json!({ "title": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_round_trip_over_http() {
    let app = ready_app().await;
    let id = task_id(&create_task(&app, "u1", "Buy milk").await);

    // Two-call start: assign self, then move to IN_PROGRESS.
    let (assign_status, assigned) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/assign"),
        Some("u2"),
        Some(json!({ "assignee_id": "u2" })),
    )
    .await;
    assert_eq!(assign_status, StatusCode::OK);
    assert_eq!(assigned["assignee_id"], json!("u2"));

    let (start_status, started) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/status"),
        Some("u2"),
        Some(json!({ "status": "IN_PROGRESS" })),
    )
    .await;
    assert_eq!(start_status, StatusCode::OK);
    assert_eq!(started["status"], json!("IN_PROGRESS"));

    // A non-assignee may not finish the task.
    let (forbidden, _) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/status"),
        Some("u1"),
        Some(json!({ "status": "DONE" })),
    )
    .await;
    assert_eq!(forbidden, StatusCode::FORBIDDEN);

    let (done_status, done) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/status"),
        Some("u2"),
        Some(json!({ "status": "DONE" })),
    )
    .await;
    assert_eq!(done_status, StatusCode::OK);
    assert_eq!(done["status"], json!("DONE"));

    // Finished tasks are frozen.
    let (frozen, _) = send_json(
        &app.router,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some("u1"),
        Some(json!({ "title": "Too late" })),
    )
    .await;
    assert_eq!(frozen, StatusCode::BAD_REQUEST);

    let (events_status, events) = send_json(
        &app.router,
        Method::GET,
        &format!("/api/tasks/{id}/events"),
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(events_status, StatusCode::OK);
    let kinds: Vec<&str> = events
        .as_array()
        .expect("events should be an array")
        .iter()
        .map(|event| event["type"].as_str().expect("type should be a string"))
        .collect();
    assert_eq!(
        kinds,
        vec!["CREATED", "ASSIGNED", "STATUS_CHANGED", "STATUS_CHANGED"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn claim_endpoint_starts_work_in_one_call() {
    let app = ready_app().await;
    let id = task_id(&create_task(&app, "u1", "Buy milk").await);

    let (status, claimed) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/claim"),
        Some("u2"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(claimed["status"], json!("IN_PROGRESS"));
    assert_eq!(claimed["assignee_id"], json!("u2"));

    // A second claim finds the task already started.
    let (conflict, _) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/claim"),
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(conflict, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_edits_open_tasks() {
    let app = ready_app().await;
    let id = task_id(&create_task(&app, "u1", "Buy milk").await);

    let (status, updated) = send_json(
        &app.router,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some("u1"),
        Some(json!({ "title": "Buy oat milk", "priority": "HIGH" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], json!("Buy oat milk"));
    assert_eq!(updated["priority"], json!("HIGH"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_hides_the_task_but_keeps_events() {
    let app = ready_app().await;
    let id = task_id(&create_task(&app, "u1", "Buy milk").await);

    let (status, deleted) = send_json(
        &app.router,
        Method::DELETE,
        &format!("/api/tasks/{id}"),
        Some("u2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["is_deleted"], json!(true));

    let (_, listed) = send_json(&app.router, Method::GET, "/api/tasks", Some("u1"), None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));

    let (events_status, events) = send_json(
        &app.router,
        Method::GET,
        &format!("/api/tasks/{id}/events"),
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(events_status, StatusCode::OK);
    let last = events
        .as_array()
        .and_then(|array| array.last())
        .expect("events should remain queryable");
    assert_eq!(last["type"], json!("DELETED"));

    // Mutations on a deleted task act like the task is gone.
    let (gone, _) = send_json(
        &app.router,
        Method::PATCH,
        &format!("/api/tasks/{id}"),
        Some("u1"),
        Some(json!({ "title": "Ghost edit" })),
    )
    .await;
    assert_eq!(gone, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status_and_priority() {
    let app = ready_app().await;
    let chore = task_id(&create_task(&app, "u1", "Chore").await);
    send_json(
        &app.router,
        Method::POST,
        "/api/tasks",
        Some("u1"),
        Some(json!({ "title": "Incident", "priority": "HIGH" })),
    )
    .await;
    send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{chore}/claim"),
        Some("u2"),
        None,
    )
    .await;

    let (_, in_progress) = send_json(
        &app.router,
        Method::GET,
        "/api/tasks?status=IN_PROGRESS",
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(in_progress.as_array().map(Vec::len), Some(1));

    let (_, high) = send_json(
        &app.router,
        Method::GET,
        "/api/tasks?priority=HIGH",
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(high.as_array().map(Vec::len), Some(1));

    let (bad, _) = send_json(
        &app.router,
        Method::GET,
        "/api/tasks?status=BOGUS",
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(bad, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn bad_identifiers_are_rejected_cleanly() {
    let app = ready_app().await;

    let (malformed, _) = send_json(
        &app.router,
        Method::DELETE,
        "/api/tasks/not-a-uuid",
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(malformed, StatusCode::BAD_REQUEST);

    let (missing, _) = send_json(
        &app.router,
        Method::DELETE,
        "/api/tasks/00000000-0000-4000-8000-000000000000",
        Some("u1"),
        None,
    )
    .await;
    assert_eq!(missing, StatusCode::NOT_FOUND);

    let id = task_id(&create_task(&app, "u1", "Buy milk").await);
    let (unknown_assignee, _) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/assign"),
        Some("u1"),
        Some(json!({ "assignee_id": "ghost" })),
    )
    .await;
    assert_eq!(unknown_assignee, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn email_history_endpoint_sends_one_mail() {
    let app = ready_app().await;
    let id = task_id(&create_task(&app, "u1", "Buy milk").await);

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/email-history"),
        Some("u1"),
        Some(json!({ "email": "audit@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sent": true }));

    let sent = app.mailer.sent().expect("record should be readable");
    assert_eq!(sent.len(), 1);
    assert!(sent.first().expect("one mail").body.contains("Buy milk"));

    let (bad, _) = send_json(
        &app.router,
        Method::POST,
        &format!("/api/tasks/{id}/email-history"),
        Some("u1"),
        Some(json!({ "email": "" })),
    )
    .await;
    assert_eq!(bad, StatusCode::BAD_REQUEST);
}
