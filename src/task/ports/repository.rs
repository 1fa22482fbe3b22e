//! Repository ports for task and audit-event persistence.

use crate::task::domain::{Priority, Task, TaskEvent, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Listing filter for task queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict results to this status.
    pub status: Option<TaskStatus>,
    /// Restrict results to this priority.
    pub priority: Option<Priority>,
}

/// Task persistence contract.
///
/// `update` is a compare-and-set: it persists only when the caller's
/// aggregate carries the currently stored version, then advances the
/// version. Read-modify-write flows built on it lose cleanly instead of
/// silently overwriting concurrent writes — this is what keeps racing
/// "take"/"start" calls safe.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task under optimistic locking and
    /// returns the stored aggregate with its advanced version.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::StaleVersion`] when the stored
    /// version no longer matches the caller's.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier, including soft-deleted records.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all non-deleted tasks matching `filter`, ordered by creation
    /// time.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task changed since it was read; the write was not applied.
    #[error("task {0} was modified concurrently")]
    StaleVersion(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for event repository operations.
pub type TaskEventRepositoryResult<T> = Result<T, TaskEventRepositoryError>;

/// Audit-event persistence contract. Append-only: events are never
/// rewritten or removed, not even when their task is soft-deleted.
#[async_trait]
pub trait TaskEventRepository: Send + Sync {
    /// Appends an event to a task's audit trail.
    async fn append(&self, event: &TaskEvent) -> TaskEventRepositoryResult<()>;

    /// Returns a task's events in ascending timestamp order; ties keep
    /// append order.
    async fn list_for_task(&self, task_id: TaskId) -> TaskEventRepositoryResult<Vec<TaskEvent>>;
}

/// Errors returned by event repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskEventRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskEventRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
