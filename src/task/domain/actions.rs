//! View-layer derivation of the actions a viewer may take on a task.
//!
//! This is a pure function over (status, viewer-is-assignee); it belongs to
//! the presentation contract, not to the lifecycle service. The service
//! enforces every rule independently — hiding a button is a courtesy, never
//! a security boundary.

use super::TaskStatus;
use serde::Serialize;

/// An action a client may offer on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Claim the task and begin work (assign self, then start).
    Start,
    /// Take over an in-progress task from its current assignee.
    Take,
    /// Complete the task.
    Done,
    /// Abandon the task.
    Cancel,
    /// Soft-delete the task.
    Delete,
}

/// Returns the actions available to a viewer for a task in `status`.
#[must_use]
pub const fn available_actions(status: TaskStatus, viewer_is_assignee: bool) -> &'static [TaskAction] {
    match (status, viewer_is_assignee) {
        (TaskStatus::New, _) => &[TaskAction::Start, TaskAction::Delete],
        (TaskStatus::InProgress, true) => &[TaskAction::Done, TaskAction::Cancel, TaskAction::Delete],
        (TaskStatus::InProgress, false) => &[TaskAction::Take],
        (TaskStatus::Done | TaskStatus::Canceled, _) => &[TaskAction::Delete],
    }
}
