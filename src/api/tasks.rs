//! HTTP handlers for the task lifecycle routes.

use super::{
    error::ApiError,
    extract::ActorId,
    state::AppState,
};
use crate::identity::domain::UserId;
use crate::task::domain::{Task, TaskEvent, TaskId};
use crate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Wire representation of a task, matching the client contract exactly.
#[derive(Debug, Serialize)]
pub(super) struct TaskResponse {
    id: String,
    title: String,
    description: String,
    status: String,
    priority: String,
    owner_id: String,
    assignee_id: Option<String>,
    due_date: Option<String>,
    is_deleted: bool,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_string(),
            description: task.description().to_owned(),
            status: task.status().to_string(),
            priority: task.priority().to_string(),
            owner_id: task.owner_id().to_string(),
            assignee_id: task.assignee_id().map(ToString::to_string),
            due_date: task.due_date().map(|date| date.to_rfc3339()),
            is_deleted: task.is_deleted(),
        }
    }
}

/// Wire representation of an audit event.
#[derive(Debug, Serialize)]
pub(super) struct EventResponse {
    id: String,
    task_id: String,
    timestamp: String,
    #[serde(rename = "type")]
    event_type: String,
    meta: Value,
}

impl From<&TaskEvent> for EventResponse {
    fn from(event: &TaskEvent) -> Self {
        Self {
            id: event.id().to_string(),
            task_id: event.task_id().to_string(),
            timestamp: event.timestamp().to_rfc3339(),
            event_type: event.event_type().to_string(),
            meta: event.meta().clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    status: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateTaskPayload {
    title: String,
    description: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateTaskPayload {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AssignPayload {
    assignee_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusPayload {
    status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EmailHistoryPayload {
    email: String,
}

#[derive(Debug, Serialize)]
pub(super) struct EmailHistoryResponse {
    sent: bool,
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    Uuid::parse_str(raw)
        .map(TaskId::from_uuid)
        .map_err(|_| ApiError::bad_request("invalid task id"))
}

#[tracing::instrument(skip(state))]
pub(super) async fn list_tasks(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state
        .tasks
        .list(&actor, query.status.as_deref(), query.priority.as_deref())
        .await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn create_task(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let mut request = CreateTaskRequest::new(payload.title);
    if let Some(description) = payload.description {
        request = request.with_description(description);
    }
    if let Some(priority) = payload.priority {
        request = request.with_priority(priority);
    }

    let task = state.tasks.create(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn update_task(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;

    let mut request = UpdateTaskRequest::new();
    if let Some(title) = payload.title {
        request = request.with_title(title);
    }
    if let Some(description) = payload.description {
        request = request.with_description(description);
    }
    if let Some(priority) = payload.priority {
        request = request.with_priority(priority);
    }

    let task = state.tasks.update(&actor, task_id, request).await?;
    Ok(Json(TaskResponse::from(&task)))
}

#[tracing::instrument(skip(state))]
pub(super) async fn delete_task(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let task = state.tasks.delete(&actor, task_id).await?;
    Ok(Json(TaskResponse::from(&task)))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn assign_task(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
    Json(payload): Json<AssignPayload>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let assignee = UserId::new(payload.assignee_id)
        .map_err(|_| ApiError::bad_request("Missing assignee_id"))?;

    let task = state.tasks.assign(&actor, task_id, &assignee).await?;
    Ok(Json(TaskResponse::from(&task)))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn change_status(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let task = state
        .tasks
        .change_status(&actor, task_id, &payload.status)
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}

#[tracing::instrument(skip(state))]
pub(super) async fn claim_task(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let task = state.tasks.claim_and_start(&actor, task_id).await?;
    Ok(Json(TaskResponse::from(&task)))
}

#[tracing::instrument(skip(state))]
pub(super) async fn list_events(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let events = state.tasks.events_for(&actor, task_id).await?;
    Ok(Json(events.iter().map(EventResponse::from).collect()))
}

#[tracing::instrument(skip(state, payload))]
pub(super) async fn email_history(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<String>,
    Json(payload): Json<EmailHistoryPayload>,
) -> Result<Json<EmailHistoryResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    state
        .tasks
        .email_history(&actor, task_id, &payload.email)
        .await?;
    Ok(Json(EmailHistoryResponse { sent: true }))
}
