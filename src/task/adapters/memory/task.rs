//! In-memory repository for task persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{DayWindows, Task, TaskFilters, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Listings are ordered deterministically so callers observe the same
/// encounter order on every invocation regardless of map iteration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Returns whether a task belongs in the daily-plan snapshot.
fn in_day_window(task: &Task, windows: &DayWindows) -> bool {
    let unfinished = !task.status().is_completed();
    task.due_date().map_or(unfinished, |due| {
        (due >= windows.start_of_yesterday() && due <= windows.end_of_week())
            || (unfinished && due < windows.start_of_today())
    })
}

/// Orders due dates ascending, absent dates last.
fn due_date_ordering(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(first), Some(second)) => first.cmp(&second),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Day-window encounter order: due date ascending with undated tasks last,
/// then creation time, then identifier.
fn window_ordering(a: &Task, b: &Task) -> Ordering {
    due_date_ordering(a.due_date(), b.due_date())
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
}

/// Listing order: newest creation first, then identifier.
fn list_ordering(a: &Task, b: &Task) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.id().into_inner().cmp(&b.id().into_inner()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(
        &self,
        filters: &TaskFilters,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filters.matches(task, now))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| list_ordering(a, b));
        Ok(tasks)
    }

    async fn list_day_window(&self, windows: &DayWindows) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| in_day_window(task, windows))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| window_ordering(a, b));
        Ok(tasks)
    }
}
