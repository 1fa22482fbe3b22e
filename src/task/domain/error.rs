//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title is {0} characters long, maximum is 200")]
    TitleTooLong(usize),

    /// The requested status change is not a defined edge of the lifecycle.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller asked for.
        to: TaskStatus,
    },

    /// Only the current assignee may move a task through its lifecycle.
    #[error("task {task_id} can only be progressed by its assignee")]
    NotAssignee {
        /// Identifier of the affected task.
        task_id: TaskId,
    },

    /// The task has reached a terminal status and its fields are frozen.
    #[error("task {task_id} is {status} and can no longer be modified")]
    TerminalTask {
        /// Identifier of the affected task.
        task_id: TaskId,
        /// The terminal status the task holds.
        status: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing event types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event type: {0}")]
pub struct ParseEventTypeError(pub String);
