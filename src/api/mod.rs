//! HTTP/JSON boundary for Taskforge.
//!
//! All `/api/tasks*` routes authenticate the caller via the `X-Actor-Id`
//! header; register and login are open. Errors render as `{"message": ...}`
//! with a status code carrying the failure class.

mod error;
mod extract;
mod identity;
mod state;
mod tasks;

pub use error::ApiError;
pub use extract::{ACTOR_HEADER, ActorId};
pub use state::{
    Accounts, AppState, DynHistoryMailer, DynTaskEventRepository, DynTaskRepository,
    DynUserRepository, Lifecycle,
};

use axum::Json;
use axum::Router;
use axum::routing::{get, patch, post};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router over the given state.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/register", post(identity::register))
        .route("/api/login", post(identity::login))
        .route("/api/users", post(identity::create_user))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/api/tasks/{id}/assign", post(tasks::assign_task))
        .route("/api/tasks/{id}/status", post(tasks::change_status))
        .route("/api/tasks/{id}/claim", post(tasks::claim_task))
        .route("/api/tasks/{id}/events", get(tasks::list_events))
        .route("/api/tasks/{id}/email-history", post(tasks::email_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tracing::instrument]
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
