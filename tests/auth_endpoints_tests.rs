//! Endpoint tests for registration, login, and user administration.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "JSON value indexing yields null rather than panicking"
)]

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;

use common::{seed_user, send_json, test_app};

#[tokio::test(flavor = "multi_thread")]
async fn register_then_login_round_trips() {
    let app = test_app();

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "nickname": "ada",
            "email": "ada@example.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id should be present").to_owned();
    assert!(body["message"].is_string());

    let (login_status, login_body) = send_json(
        &app.router,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "ada@example.com", "nickname": "ada" })),
    )
    .await;

    assert_eq!(login_status, StatusCode::OK);
    assert_eq!(login_body["id"], json!(id));
    assert_eq!(login_body["role"], json!("USER"));
    assert_eq!(login_body["nickname"], json!("ada"));
}

#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_duplicate_nickname_with_conflict() {
    let app = test_app();

    let payload = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "nickname": "ada",
        "email": "ada@example.com",
    });
    let (first, _) = send_json(
        &app.router,
        Method::POST,
        "/api/register",
        None,
        Some(payload),
    )
    .await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, body) = send_json(
        &app.router,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "first_name": "Augusta",
            "last_name": "King",
            "nickname": "ada",
            "email": "augusta@example.com",
        })),
    )
    .await;

    assert_eq!(second, StatusCode::CONFLICT);
    assert!(body["message"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_malformed_fields() {
    let app = test_app();

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "nickname": "ada",
            "email": "not-an-email",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn login_with_unknown_pair_is_not_found() {
    let app = test_app();

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "nobody@example.com", "nickname": "nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn login_as_blocked_user_is_not_found() {
    let app = test_app();
    seed_user(&app.router, "b1", "USER", "BLOCKED").await;

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "b1@example.com", "nickname": "nick_b1" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_endpoint_creates_fully_specified_users() {
    let app = test_app();

    let (status, body) = send_json(
        &app.router,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "id": "m1",
            "email": "m@example.com",
            "nickname": "mm1",
            "first_name": "Manager",
            "last_name": "One",
            "role": "MANAGER",
            "status": "ACTIVE",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!("m1"));
    assert_eq!(body["role"], json!("MANAGER"));
    assert_eq!(body["status"], json!("ACTIVE"));
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_endpoint_rejects_unknown_roles() {
    let app = test_app();

    let (status, _) = send_json(
        &app.router,
        Method::POST,
        "/api/users",
        None,
        Some(json!({
            "id": "x1",
            "email": "x@example.com",
            "nickname": "xx1",
            "first_name": "X",
            "last_name": "One",
            "role": "ROOT",
            "status": "ACTIVE",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
