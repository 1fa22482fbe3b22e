//! `PostgreSQL` repository implementations for task lifecycle storage.

use super::{
    models::{EventRow, NewEventRow, NewTaskRow, TaskRow},
    schema::{task_events, tasks},
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{
        PersistedEventData, PersistedTaskData, Priority, Task, TaskEvent, TaskEventType, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{
        TaskEventRepository, TaskEventRepositoryError, TaskEventRepositoryResult, TaskFilter,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let expected_version = task.version();
        let data = task.to_persisted();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table.filter(
                    tasks::id
                        .eq(task_id.into_inner())
                        .and(tasks::version.eq(expected_version)),
                ),
            )
            .set((
                tasks::title.eq(data.title.as_str().to_owned()),
                tasks::description.eq(data.description.clone()),
                tasks::status.eq(data.status.as_str().to_owned()),
                tasks::priority.eq(data.priority.as_str().to_owned()),
                tasks::assignee_id.eq(data.assignee_id.as_ref().map(|id| id.as_str().to_owned())),
                tasks::due_date.eq(data.due_date),
                tasks::is_deleted.eq(data.is_deleted),
                tasks::version.eq(expected_version + 1),
                tasks::updated_at.eq(data.updated_at),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;

            match updated {
                Some(row) => row_to_task(row),
                // Zero rows matched: either the task is gone or someone else
                // won the version race.
                None => {
                    let exists = tasks::table
                        .filter(tasks::id.eq(task_id.into_inner()))
                        .select(tasks::id)
                        .first::<uuid::Uuid>(connection)
                        .optional()
                        .map_err(TaskRepositoryError::persistence)?;
                    match exists {
                        Some(_) => Err(TaskRepositoryError::StaleVersion(task_id)),
                        None => Err(TaskRepositoryError::NotFound(task_id)),
                    }
                }
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let list_filter = *filter;
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .filter(tasks::is_deleted.eq(false))
                .order(tasks::created_at.asc())
                .into_boxed();
            if let Some(status) = list_filter.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = list_filter.priority {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }

            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    let data = task.to_persisted();
    NewTaskRow {
        id: data.id.into_inner(),
        title: data.title.as_str().to_owned(),
        description: data.description,
        status: data.status.as_str().to_owned(),
        priority: data.priority.as_str().to_owned(),
        owner_id: data.owner_id.as_str().to_owned(),
        assignee_id: data.assignee_id.map(|id| id.as_str().to_owned()),
        due_date: data.due_date,
        is_deleted: data.is_deleted,
        version: data.version,
        created_at: data.created_at,
        updated_at: data.updated_at,
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        priority,
        owner_id,
        assignee_id,
        due_date,
        is_deleted,
        version,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        priority: Priority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        owner_id: UserId::new(owner_id).map_err(TaskRepositoryError::persistence)?,
        assignee_id: assignee_id
            .map(UserId::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        due_date,
        is_deleted,
        version,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

/// `PostgreSQL`-backed audit-event repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskEventRepository {
    pool: TaskPgPool,
}

impl PostgresTaskEventRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskEventRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskEventRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskEventRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskEventRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskEventRepository for PostgresTaskEventRepository {
    async fn append(&self, event: &TaskEvent) -> TaskEventRepositoryResult<()> {
        let new_row = NewEventRow {
            id: event.id().into_inner(),
            task_id: event.task_id().into_inner(),
            recorded_at: event.timestamp(),
            event_type: event.event_type().as_str().to_owned(),
            meta: event.meta().clone(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(task_events::table)
                .values(&new_row)
                .execute(connection)
                .map_err(TaskEventRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskEventRepositoryResult<Vec<TaskEvent>> {
        self.run_blocking(move |connection| {
            let rows = task_events::table
                .filter(task_events::task_id.eq(task_id.into_inner()))
                .order((task_events::recorded_at.asc(), task_events::seq.asc()))
                .select(EventRow::as_select())
                .load::<EventRow>(connection)
                .map_err(TaskEventRepositoryError::persistence)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }
}

fn row_to_event(row: EventRow) -> TaskEventRepositoryResult<TaskEvent> {
    let data = PersistedEventData {
        id: crate::task::domain::EventId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        timestamp: row.recorded_at,
        event_type: TaskEventType::try_from(row.event_type.as_str())
            .map_err(TaskEventRepositoryError::persistence)?,
        meta: row.meta,
    };
    Ok(TaskEvent::from_persisted(data))
}
