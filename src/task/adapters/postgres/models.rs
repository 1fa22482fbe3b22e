//! Diesel row models for task and event persistence.

use super::schema::{task_events, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Owner identifier.
    pub owner_id: String,
    /// Assignee identifier, if any.
    pub assignee_id: Option<String>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Optimistic-lock version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Owner identifier.
    pub owner_id: String,
    /// Assignee identifier, if any.
    pub assignee_id: Option<String>,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Optimistic-lock version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for audit events.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    /// Monotonic insertion sequence.
    pub seq: i64,
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Identifier of the task the event belongs to.
    pub task_id: uuid::Uuid,
    /// Event timestamp.
    pub recorded_at: DateTime<Utc>,
    /// Event category.
    pub event_type: String,
    /// Free-form payload.
    pub meta: Value,
}

/// Insert model for audit events; `seq` is database-assigned.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_events)]
pub struct NewEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Identifier of the task the event belongs to.
    pub task_id: uuid::Uuid,
    /// Event timestamp.
    pub recorded_at: DateTime<Utc>,
    /// Event category.
    pub event_type: String,
    /// Free-form payload.
    pub meta: Value,
}
