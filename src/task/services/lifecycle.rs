//! Service layer for the task lifecycle.
//!
//! Orchestrates actor resolution, domain mutations, optimistic-locked
//! persistence, and the audit trail. Every successful mutation appends one
//! event per state change, stamped by the service clock.

use crate::identity::{
    domain::{EmailAddress, Role, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use crate::task::{
    domain::{
        ParsePriorityError, ParseTaskStatusError, Priority, Task, TaskDomainError, TaskEvent,
        TaskId, TaskStatus, TaskTitle, TaskUpdate,
    },
    ports::{
        HistoryEmail, HistoryMailer, MailerError, TaskEventRepository, TaskEventRepositoryError,
        TaskFilter, TaskRepository, TaskRepositoryError,
    },
};
use minijinja::{Environment, context};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw priority string (`LOW`/`NORMAL`/`HIGH`).
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Request payload for updating task fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw replacement priority string.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Event repository operation failed.
    #[error(transparent)]
    Events(#[from] TaskEventRepositoryError),
    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Mail delivery failed.
    #[error(transparent)]
    Mail(#[from] MailerError),
    /// The status string is not a known status.
    #[error(transparent)]
    UnknownStatus(#[from] ParseTaskStatusError),
    /// The priority string is not a known priority.
    #[error(transparent)]
    UnknownPriority(#[from] ParsePriorityError),
    /// The history email body could not be rendered.
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
    /// The task does not exist (or is deleted, for mutating calls).
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The acting user does not exist.
    #[error("actor not found: {0}")]
    ActorNotFound(UserId),
    /// The requested assignee does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),
    /// The acting user is blocked.
    #[error("user {0} is blocked")]
    ActorBlocked(UserId),
    /// The requested assignee is blocked.
    #[error("assignee {0} is blocked")]
    AssigneeBlocked(UserId),
    /// The actor is neither owner, assignee, nor manager.
    #[error("user {0} may not edit this task")]
    EditForbidden(UserId),
    /// The history recipient address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidRecipient(String),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, E, U, M, C>
where
    T: TaskRepository,
    E: TaskEventRepository,
    U: UserRepository,
    M: HistoryMailer,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    events: Arc<E>,
    users: Arc<U>,
    mailer: Arc<M>,
    clock: Arc<C>,
}

impl<T, E, U, M, C> TaskLifecycleService<T, E, U, M, C>
where
    T: TaskRepository,
    E: TaskEventRepository,
    U: UserRepository,
    M: HistoryMailer,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        events: Arc<E>,
        users: Arc<U>,
        mailer: Arc<M>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            events,
            users,
            mailer,
            clock,
        }
    }

    /// Creates a task owned by the actor, in `NEW` with no assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the actor is unknown or blocked,
    /// the title fails validation, or the priority string is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        actor_id: &UserId,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.active_actor(actor_id).await?;
        let title = TaskTitle::new(request.title)?;
        let priority = request
            .priority
            .as_deref()
            .map(Priority::try_from)
            .transpose()?
            .unwrap_or_default();

        let task = Task::new(
            title,
            request.description.unwrap_or_default(),
            priority,
            actor.id().clone(),
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        self.events
            .append(&TaskEvent::created(task.id(), actor.id(), &*self.clock))
            .await?;
        Ok(task)
    }

    /// Updates title, description, or priority of an open task.
    ///
    /// A request that changes nothing returns the task untouched and
    /// appends no event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is terminal
    /// (regardless of actor), or [`TaskLifecycleError::EditForbidden`] when
    /// the actor is neither owner, assignee, nor manager.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        actor_id: &UserId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.active_actor(actor_id).await?;
        let mut task = self.open_task(task_id).await?;

        // Terminal state wins over authorization: a DONE task reports the
        // same failure to its owner and to strangers.
        if task.status().is_terminal() {
            return Err(TaskDomainError::TerminalTask {
                task_id: task.id(),
                status: task.status(),
            }
            .into());
        }
        if !may_edit(&actor, &task) {
            return Err(TaskLifecycleError::EditForbidden(actor_id.clone()));
        }

        let update = TaskUpdate {
            title: request.title.map(TaskTitle::new).transpose()?,
            description: request.description,
            priority: request
                .priority
                .as_deref()
                .map(Priority::try_from)
                .transpose()?,
        };

        match task.apply_update(update, &*self.clock)? {
            None => Ok(task),
            Some(diff) => {
                let stored = self.tasks.update(&task).await?;
                self.events
                    .append(&TaskEvent::updated(
                        stored.id(),
                        actor.id(),
                        diff,
                        &*self.clock,
                    ))
                    .await?;
                Ok(stored)
            }
        }
    }

    /// Sets the assignee of an open task.
    ///
    /// Assignment is unconditional while the task is open: any active actor
    /// may assign anyone active, including taking over an in-progress task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::AssigneeNotFound`] or
    /// [`TaskLifecycleError::AssigneeBlocked`] for bad assignees, and
    /// [`TaskLifecycleError::Domain`] when the task is terminal.
    #[tracing::instrument(skip(self))]
    pub async fn assign(
        &self,
        actor_id: &UserId,
        task_id: TaskId,
        assignee_id: &UserId,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.active_actor(actor_id).await?;
        let mut task = self.open_task(task_id).await?;

        let assignee = self
            .users
            .find_by_id(assignee_id)
            .await?
            .ok_or_else(|| TaskLifecycleError::AssigneeNotFound(assignee_id.clone()))?;
        if !assignee.is_active() {
            return Err(TaskLifecycleError::AssigneeBlocked(assignee_id.clone()));
        }

        let previous = task.assign(assignee.id().clone(), &*self.clock)?;
        let stored = self.tasks.update(&task).await?;
        self.events
            .append(&TaskEvent::assigned(
                stored.id(),
                previous.as_ref(),
                assignee.id(),
                actor.id(),
                &*self.clock,
            ))
            .await?;
        Ok(stored)
    }

    /// Moves a task along the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownStatus`] for unparseable status
    /// strings and [`TaskLifecycleError::Domain`] when the edge is invalid
    /// or the actor is not the assignee.
    #[tracing::instrument(skip(self))]
    pub async fn change_status(
        &self,
        actor_id: &UserId,
        task_id: TaskId,
        status: &str,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.active_actor(actor_id).await?;
        let mut task = self.open_task(task_id).await?;

        let target = TaskStatus::try_from(status)?;
        let previous = task.transition_to(target, actor.id(), &*self.clock)?;
        let stored = self.tasks.update(&task).await?;
        self.events
            .append(&TaskEvent::status_changed(
                stored.id(),
                previous,
                target,
                actor.id(),
                &*self.clock,
            ))
            .await?;
        Ok(stored)
    }

    /// Claims a `NEW` task and starts work on it in one step.
    ///
    /// Both the assignment and the transition land in a single
    /// optimistically-locked write, so a failure leaves no
    /// assigned-but-`NEW` residue and concurrent claims have exactly one
    /// winner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is not `NEW`,
    /// and [`TaskLifecycleError::Tasks`] with a stale-version error when a
    /// concurrent claim won.
    #[tracing::instrument(skip(self))]
    pub async fn claim_and_start(
        &self,
        actor_id: &UserId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.active_actor(actor_id).await?;
        let mut task = self.open_task(task_id).await?;

        let previous_assignee = task.assign(actor.id().clone(), &*self.clock)?;
        let previous_status =
            task.transition_to(TaskStatus::InProgress, actor.id(), &*self.clock)?;

        let stored = self.tasks.update(&task).await?;
        self.events
            .append(&TaskEvent::assigned(
                stored.id(),
                previous_assignee.as_ref(),
                actor.id(),
                actor.id(),
                &*self.clock,
            ))
            .await?;
        self.events
            .append(&TaskEvent::status_changed(
                stored.id(),
                previous_status,
                TaskStatus::InProgress,
                actor.id(),
                &*self.clock,
            ))
            .await?;
        Ok(stored)
    }

    /// Soft-deletes a task from any status; repeated deletes are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor_id: &UserId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let actor = self.active_actor(actor_id).await?;
        let mut task = self.any_task(task_id).await?;

        if !task.mark_deleted(&*self.clock) {
            return Ok(task);
        }

        let stored = self.tasks.update(&task).await?;
        self.events
            .append(&TaskEvent::deleted(stored.id(), actor.id(), &*self.clock))
            .await?;
        Ok(stored)
    }

    /// Lists non-deleted tasks, optionally filtered by status and priority.
    ///
    /// Every authenticated actor sees every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownStatus`] or
    /// [`TaskLifecycleError::UnknownPriority`] for unparseable filters.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        actor_id: &UserId,
        status: Option<&str>,
        priority: Option<&str>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        self.active_actor(actor_id).await?;
        let filter = TaskFilter {
            status: status.map(TaskStatus::try_from).transpose()?,
            priority: priority.map(Priority::try_from).transpose()?,
        };
        Ok(self.tasks.list(&filter).await?)
    }

    /// Returns a task's audit trail in ascending timestamp order.
    ///
    /// Works for soft-deleted tasks; history outlives deletion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist.
    #[tracing::instrument(skip(self))]
    pub async fn events_for(
        &self,
        actor_id: &UserId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Vec<TaskEvent>> {
        self.active_actor(actor_id).await?;
        let task = self.any_task(task_id).await?;
        Ok(self.events.list_for_task(task.id()).await?)
    }

    /// Renders a task's audit trail and mails it to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidRecipient`] for malformed
    /// addresses and [`TaskLifecycleError::Mail`] when delivery fails.
    #[tracing::instrument(skip(self))]
    pub async fn email_history(
        &self,
        actor_id: &UserId,
        task_id: TaskId,
        recipient: &str,
    ) -> TaskLifecycleResult<()> {
        self.active_actor(actor_id).await?;
        let task = self.any_task(task_id).await?;

        let to = EmailAddress::new(recipient)
            .map_err(|_| TaskLifecycleError::InvalidRecipient(recipient.to_owned()))?;
        let history = self.events.list_for_task(task.id()).await?;

        let subject = format!("Task History {}", self.clock.utc().format("%Y-%m-%d"));
        let body = render_history_body(&task, &history)?;
        self.mailer.send(&HistoryEmail { to, subject, body }).await?;
        Ok(())
    }

    async fn active_actor(&self, actor_id: &UserId) -> TaskLifecycleResult<User> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| TaskLifecycleError::ActorNotFound(actor_id.clone()))?;
        if !actor.is_active() {
            return Err(TaskLifecycleError::ActorBlocked(actor_id.clone()));
        }
        Ok(actor)
    }

    async fn any_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn open_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.any_task(task_id).await?;
        if task.is_deleted() {
            return Err(TaskLifecycleError::TaskNotFound(task_id));
        }
        Ok(task)
    }
}

fn may_edit(actor: &User, task: &Task) -> bool {
    actor.role() == Role::Manager
        || task.owner_id() == actor.id()
        || task.is_assignee(actor.id())
}

const HISTORY_BODY_TEMPLATE: &str = "\
Task \"{{ title }}\" history:
{% for event in events %}* {{ event.at }} {{ event.kind }} {{ event.details }}
{% endfor %}";

#[derive(Serialize)]
struct HistoryLine {
    at: String,
    kind: &'static str,
    details: String,
}

fn render_history_body(task: &Task, events: &[TaskEvent]) -> Result<String, minijinja::Error> {
    let lines: Vec<HistoryLine> = events
        .iter()
        .map(|event| HistoryLine {
            at: event.timestamp().to_rfc3339(),
            kind: event.event_type().as_str(),
            details: event.meta().to_string(),
        })
        .collect();

    let mut env = Environment::new();
    env.add_template("history", HISTORY_BODY_TEMPLATE)?;
    let template = env.get_template("history")?;
    template.render(context! { title => task.title().as_str(), events => lines })
}
