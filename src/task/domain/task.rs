//! Task aggregate root.

use super::{Priority, TaskDomainError, TaskId, TaskStatus, TaskTitle};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Task aggregate root.
///
/// Tasks are created in [`TaskStatus::New`] with no assignee and advance
/// through the lifecycle only via [`Task::transition_to`]. Deletion is a
/// soft flag: deleted tasks disappear from listings but keep their history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    priority: Priority,
    owner_id: UserId,
    assignee_id: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    is_deleted: bool,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted owner identifier.
    pub owner_id: UserId,
    /// Persisted assignee identifier, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted soft-deletion flag.
    pub is_deleted: bool,
    /// Persisted optimistic-lock version.
    pub version: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field changes requested by a task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement title, if requested.
    pub title: Option<TaskTitle>,
    /// Replacement description, if requested.
    pub description: Option<String>,
    /// Replacement priority, if requested.
    pub priority: Option<Priority>,
}

impl Task {
    /// Creates a new task owned by `owner_id`, in `NEW` with no assignee.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: String,
        priority: Priority,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            description,
            status: TaskStatus::New,
            priority,
            owner_id,
            assignee_id: None,
            due_date: None,
            is_deleted: false,
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            owner_id: data.owner_id,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
            is_deleted: data.is_deleted,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Extracts the persistable state of this task.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            owner_id: self.owner_id.clone(),
            assignee_id: self.assignee_id.clone(),
            due_date: self.due_date,
            is_deleted: self.is_deleted,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the owner identifier. Ownership never changes.
    #[must_use]
    pub const fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<&UserId> {
        self.assignee_id.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns `true` when the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the optimistic-lock version.
    ///
    /// The version is advanced by the repository on each successful update;
    /// a stale aggregate fails its next write instead of overwriting newer
    /// state.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when `user` is the current assignee.
    #[must_use]
    pub fn is_assignee(&self, user: &UserId) -> bool {
        self.assignee_id.as_ref() == Some(user)
    }

    /// Sets the assignee, returning the previous holder.
    ///
    /// Assignment is unconditional while the task is open: an in-progress
    /// task may be taken over without a status change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TerminalTask`] when the task is `DONE` or
    /// `CANCELED`.
    pub fn assign(
        &mut self,
        assignee: UserId,
        clock: &impl Clock,
    ) -> Result<Option<UserId>, TaskDomainError> {
        self.ensure_not_terminal()?;
        let previous = self.assignee_id.replace(assignee);
        self.touch(clock);
        Ok(previous)
    }

    /// Moves the task to `target`, returning the previous status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the edge is
    /// not part of the lifecycle, or [`TaskDomainError::NotAssignee`] when
    /// `actor` is not the current assignee — an unassigned task can never
    /// leave `NEW`.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        actor: &UserId,
        clock: &impl Clock,
    ) -> Result<TaskStatus, TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        if !self.is_assignee(actor) {
            return Err(TaskDomainError::NotAssignee { task_id: self.id });
        }

        let previous = self.status;
        self.status = target;
        self.touch(clock);
        Ok(previous)
    }

    /// Applies requested field changes, returning the per-field old and new
    /// values, or `None` when nothing effectively changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TerminalTask`] when the task is `DONE` or
    /// `CANCELED`; finished work is frozen for every caller.
    pub fn apply_update(
        &mut self,
        update: TaskUpdate,
        clock: &impl Clock,
    ) -> Result<Option<Value>, TaskDomainError> {
        self.ensure_not_terminal()?;

        let mut changes = Map::new();

        if let Some(new_title) = update.title
            && new_title != self.title
        {
            changes.insert(
                "title".to_owned(),
                json!({ "from": self.title.as_str(), "to": new_title.as_str() }),
            );
            self.title = new_title;
        }

        if let Some(new_description) = update.description
            && new_description != self.description
        {
            changes.insert(
                "description".to_owned(),
                json!({ "from": self.description, "to": new_description }),
            );
            self.description = new_description;
        }

        if let Some(new_priority) = update.priority
            && new_priority != self.priority
        {
            changes.insert(
                "priority".to_owned(),
                json!({ "from": self.priority.as_str(), "to": new_priority.as_str() }),
            );
            self.priority = new_priority;
        }

        if changes.is_empty() {
            return Ok(None);
        }

        self.touch(clock);
        Ok(Some(Value::Object(changes)))
    }

    /// Soft-deletes the task, returning `false` when it was already deleted.
    ///
    /// Deletion is permitted from any status; the record and its events are
    /// retained.
    pub fn mark_deleted(&mut self, clock: &impl Clock) -> bool {
        if self.is_deleted {
            return false;
        }
        self.is_deleted = true;
        self.touch(clock);
        true
    }

    fn ensure_not_terminal(&self) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TerminalTask {
                task_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
