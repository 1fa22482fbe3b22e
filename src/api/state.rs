//! Application state and port wiring for the HTTP boundary.
//!
//! The composition root picks storage adapters at runtime, so the services
//! here are instantiated over small type-erased handles instead of concrete
//! adapter types. One router serves every backend.

use crate::identity::{
    domain::{EmailAddress, Nickname, User, UserId},
    ports::{UserRepository, UserRepositoryResult},
    services::AccountService,
};
use crate::task::{
    adapters::{
        mailer::TracingHistoryMailer,
        memory::{InMemoryTaskEventRepository, InMemoryTaskRepository},
    },
    domain::{Task, TaskEvent, TaskId},
    ports::{
        HistoryEmail, HistoryMailer, MailerError, TaskEventRepository, TaskEventRepositoryResult,
        TaskFilter, TaskRepository, TaskRepositoryResult,
    },
    services::TaskLifecycleService,
};
use async_trait::async_trait;
use mockable::DefaultClock;
use std::sync::Arc;

/// Type-erased user repository handle.
#[derive(Clone)]
pub struct DynUserRepository(Arc<dyn UserRepository>);

impl DynUserRepository {
    /// Wraps a user repository behind a shared handle.
    #[must_use]
    pub fn new(inner: Arc<dyn UserRepository>) -> Self {
        Self(inner)
    }
}

#[async_trait]
impl UserRepository for DynUserRepository {
    async fn add(&self, user: &User) -> UserRepositoryResult<()> {
        self.0.add(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        self.0.find_by_id(id).await
    }

    async fn find_by_login(
        &self,
        email: &EmailAddress,
        nickname: &Nickname,
    ) -> UserRepositoryResult<Option<User>> {
        self.0.find_by_login(email, nickname).await
    }
}

/// Type-erased task repository handle.
#[derive(Clone)]
pub struct DynTaskRepository(Arc<dyn TaskRepository>);

impl DynTaskRepository {
    /// Wraps a task repository behind a shared handle.
    #[must_use]
    pub fn new(inner: Arc<dyn TaskRepository>) -> Self {
        Self(inner)
    }
}

#[async_trait]
impl TaskRepository for DynTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.0.store(task).await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        self.0.update(task).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.0.find_by_id(id).await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        self.0.list(filter).await
    }
}

/// Type-erased audit-event repository handle.
#[derive(Clone)]
pub struct DynTaskEventRepository(Arc<dyn TaskEventRepository>);

impl DynTaskEventRepository {
    /// Wraps an event repository behind a shared handle.
    #[must_use]
    pub fn new(inner: Arc<dyn TaskEventRepository>) -> Self {
        Self(inner)
    }
}

#[async_trait]
impl TaskEventRepository for DynTaskEventRepository {
    async fn append(&self, event: &TaskEvent) -> TaskEventRepositoryResult<()> {
        self.0.append(event).await
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskEventRepositoryResult<Vec<TaskEvent>> {
        self.0.list_for_task(task_id).await
    }
}

/// Type-erased history mailer handle.
#[derive(Clone)]
pub struct DynHistoryMailer(Arc<dyn HistoryMailer>);

impl DynHistoryMailer {
    /// Wraps a mailer behind a shared handle.
    #[must_use]
    pub fn new(inner: Arc<dyn HistoryMailer>) -> Self {
        Self(inner)
    }
}

#[async_trait]
impl HistoryMailer for DynHistoryMailer {
    async fn send(&self, email: &HistoryEmail) -> Result<(), MailerError> {
        self.0.send(email).await
    }
}

/// Account service as composed for the HTTP boundary.
pub type Accounts = AccountService<DynUserRepository, DefaultClock>;

/// Lifecycle service as composed for the HTTP boundary.
pub type Lifecycle = TaskLifecycleService<
    DynTaskRepository,
    DynTaskEventRepository,
    DynUserRepository,
    DynHistoryMailer,
    DefaultClock,
>;

/// Shared state behind every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    /// Account registration and login service.
    pub accounts: Arc<Accounts>,
    /// Task lifecycle service.
    pub tasks: Arc<Lifecycle>,
}

impl AppState {
    /// Composes the services over the given port implementations.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
        events: Arc<dyn TaskEventRepository>,
        mailer: Arc<dyn HistoryMailer>,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        let user_port = DynUserRepository::new(users);

        let accounts = AccountService::new(Arc::new(user_port.clone()), Arc::clone(&clock));
        let lifecycle = TaskLifecycleService::new(
            Arc::new(DynTaskRepository::new(tasks)),
            Arc::new(DynTaskEventRepository::new(events)),
            Arc::new(user_port),
            Arc::new(DynHistoryMailer::new(mailer)),
            clock,
        );

        Self {
            accounts: Arc::new(accounts),
            tasks: Arc::new(lifecycle),
        }
    }

    /// Composes the services over fresh in-memory adapters.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::identity::adapters::memory::InMemoryUserRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryTaskEventRepository::new()),
            Arc::new(TracingHistoryMailer::new()),
        )
    }
}
