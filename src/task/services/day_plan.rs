//! Service layer for the daily-plan view.
//!
//! The single call site for daily aggregation: every presentation surface
//! obtains its "My Day" buckets through this service, so the rule set cannot
//! drift between consumers.

use crate::task::{
    domain::{DayPlan, DayWindows, plan_day},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for daily-plan retrieval.
#[derive(Debug, Error)]
pub enum DayPlanError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for daily-plan service operations.
pub type DayPlanResult<T> = Result<T, DayPlanError>;

/// Daily-plan orchestration service.
#[derive(Clone)]
pub struct DayPlanService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> DayPlanService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new daily-plan service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Computes the daily plan relative to the injected clock's current
    /// instant.
    ///
    /// # Errors
    ///
    /// Returns [`DayPlanError::Repository`] when the snapshot fetch fails.
    pub async fn plan(&self) -> DayPlanResult<DayPlan> {
        let now = self.clock.utc();
        self.plan_at(now).await
    }

    /// Computes the daily plan relative to an explicit reference instant.
    ///
    /// # Errors
    ///
    /// Returns [`DayPlanError::Repository`] when the snapshot fetch fails.
    pub async fn plan_at(&self, now: DateTime<Utc>) -> DayPlanResult<DayPlan> {
        let windows = DayWindows::around(now);
        let tasks = self.repository.list_day_window(&windows).await?;
        log::debug!("planning day view over {} candidate tasks", tasks.len());
        Ok(plan_day(&tasks, now))
    }
}
