//! Append-only audit events for task mutations.

use super::{EventId, ParseEventTypeError, TaskId, TaskStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Category of a task audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskEventType {
    /// The task was created.
    Created,
    /// The assignee changed.
    Assigned,
    /// The lifecycle status changed.
    StatusChanged,
    /// Title, description, or priority changed.
    Updated,
    /// The task was soft-deleted.
    Deleted,
}

impl TaskEventType {
    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Assigned => "ASSIGNED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::Updated => "UPDATED",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for TaskEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskEventType {
    type Error = ParseEventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "CREATED" => Ok(Self::Created),
            "ASSIGNED" => Ok(Self::Assigned),
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "UPDATED" => Ok(Self::Updated),
            "DELETED" => Ok(Self::Deleted),
            _ => Err(ParseEventTypeError(value.to_owned())),
        }
    }
}

/// Immutable audit record of a single task mutation.
///
/// Events are never edited or deleted; they outlive the soft deletion of
/// their task. Per task, timestamps are non-decreasing in append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    id: EventId,
    task_id: TaskId,
    timestamp: DateTime<Utc>,
    event_type: TaskEventType,
    meta: Value,
}

/// Parameter object for reconstructing a persisted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEventData {
    /// Persisted event identifier.
    pub id: EventId,
    /// Identifier of the task the event belongs to.
    pub task_id: TaskId,
    /// Persisted event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Persisted event category.
    pub event_type: TaskEventType,
    /// Persisted free-form payload.
    pub meta: Value,
}

impl TaskEvent {
    /// Records the creation of a task.
    #[must_use]
    pub fn created(task_id: TaskId, owner: &UserId, clock: &impl Clock) -> Self {
        Self::record(task_id, TaskEventType::Created, json!({ "owner": owner }), clock)
    }

    /// Records an assignee change, keeping the previous holder if any.
    #[must_use]
    pub fn assigned(
        task_id: TaskId,
        previous: Option<&UserId>,
        assignee: &UserId,
        actor: &UserId,
        clock: &impl Clock,
    ) -> Self {
        Self::record(
            task_id,
            TaskEventType::Assigned,
            json!({ "from": previous, "to": assignee, "by": actor }),
            clock,
        )
    }

    /// Records a lifecycle status change.
    #[must_use]
    pub fn status_changed(
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
        actor: &UserId,
        clock: &impl Clock,
    ) -> Self {
        Self::record(
            task_id,
            TaskEventType::StatusChanged,
            json!({ "from": from.as_str(), "to": to.as_str(), "by": actor }),
            clock,
        )
    }

    /// Records a field update with per-field old and new values.
    #[must_use]
    pub fn updated(task_id: TaskId, actor: &UserId, changes: Value, clock: &impl Clock) -> Self {
        Self::record(
            task_id,
            TaskEventType::Updated,
            json!({ "by": actor, "changes": changes }),
            clock,
        )
    }

    /// Records a soft deletion.
    #[must_use]
    pub fn deleted(task_id: TaskId, actor: &UserId, clock: &impl Clock) -> Self {
        Self::record(task_id, TaskEventType::Deleted, json!({ "by": actor }), clock)
    }

    fn record(task_id: TaskId, event_type: TaskEventType, meta: Value, clock: &impl Clock) -> Self {
        Self {
            id: EventId::new(),
            task_id,
            timestamp: clock.utc(),
            event_type,
            meta,
        }
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEventData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            timestamp: data.timestamp,
            event_type: data.event_type,
            meta: data.meta,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the identifier of the task the event belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the event timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the event category.
    #[must_use]
    pub const fn event_type(&self) -> TaskEventType {
        self.event_type
    }

    /// Returns the free-form payload.
    #[must_use]
    pub const fn meta(&self) -> &Value {
        &self.meta
    }
}
