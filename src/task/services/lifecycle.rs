//! Service layer for task creation and lifecycle mutation.

use crate::task::{
    domain::{
        NewTask, ParseTaskPriorityError, ParseTaskStatusError, Task, TaskDomainError,
        TaskFilters, TaskId, TaskPriority, TaskStatus, TeamId, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// Status and priority arrive as raw caller input and are parsed strictly;
/// a task always starts out pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
    team_id: Option<TeamId>,
    created_by: UserId,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            assigned_to: None,
            team_id: None,
            created_by,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Sets the owning team.
    #[must_use]
    pub const fn with_team(mut self, team: TeamId) -> Self {
        self.team_id = Some(team);
        self
    }
}

/// Request payload for moving a task to a different status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request from raw caller input.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
        }
    }
}

/// Request payload for replacing a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescheduleTaskRequest {
    task_id: TaskId,
    due_date: Option<DateTime<Utc>>,
}

impl RescheduleTaskRequest {
    /// Creates a reschedule request; `None` clears the due date.
    #[must_use]
    pub const fn new(task_id: TaskId, due_date: Option<DateTime<Utc>>) -> Self {
        Self { task_id, due_date }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Caller-supplied status value was not recognised.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    /// Caller-supplied priority value was not recognised.
    #[error(transparent)]
    Priority(#[from] ParseTaskPriorityError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The targeted task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let mut data = NewTask::new(request.title, request.created_by)?;
        if let Some(description) = request.description {
            data = data.with_description(description);
        }
        if let Some(raw_priority) = request.priority {
            data = data.with_priority(TaskPriority::try_from(raw_priority.as_str())?);
        }
        if let Some(due_date) = request.due_date {
            data = data.with_due_date(due_date);
        }
        if let Some(user) = request.assigned_to {
            data = data.with_assignee(user);
        }
        if let Some(team) = request.team_id {
            data = data.with_team(team);
        }

        let task = Task::create(data, &*self.clock);
        self.repository.store(&task).await?;
        log::info!("created task {}", task.id());
        Ok(task)
    }

    /// Moves a task to a different status and persists the change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the status value is unrecognised,
    /// the task does not exist, the transition is rejected, or persistence
    /// fails.
    pub async fn transition(&self, request: TransitionTaskRequest) -> TaskLifecycleResult<Task> {
        let target = TaskStatus::try_from(request.target_status.as_str())?;
        let mut task = self.load(request.task_id).await?;
        task.transition_status(target, &*self.clock)?;
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Replaces a task's due date and persists the change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task does not exist or
    /// persistence fails.
    pub async fn reschedule(&self, request: RescheduleTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = self.load(request.task_id).await?;
        task.reschedule(request.due_date, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists tasks matching `filters`, newest creation first.
    ///
    /// Relative date constraints are judged against the injected clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list(&self, filters: &TaskFilters) -> TaskLifecycleResult<Vec<Task>> {
        let now = self.clock.utc();
        Ok(self.repository.list(filters, now).await?)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or deletion fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        Ok(self.repository.delete(id).await?)
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }
}
