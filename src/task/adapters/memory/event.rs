//! In-memory audit-event repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskEvent, TaskId},
    ports::{TaskEventRepository, TaskEventRepositoryError, TaskEventRepositoryResult},
};

/// Thread-safe in-memory audit-event repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskEventRepository {
    state: Arc<RwLock<HashMap<TaskId, Vec<TaskEvent>>>>,
}

impl InMemoryTaskEventRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskEventRepository for InMemoryTaskEventRepository {
    async fn append(&self, event: &TaskEvent) -> TaskEventRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskEventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .entry(event.task_id())
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskEventRepositoryResult<Vec<TaskEvent>> {
        let state = self.state.read().map_err(|err| {
            TaskEventRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut events = state.get(&task_id).cloned().unwrap_or_default();
        // Stable sort: equal timestamps keep their append order.
        events.sort_by_key(TaskEvent::timestamp);
        Ok(events)
    }
}
