//! `PostgreSQL` repository implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        DayWindows, PersistedTaskData, Task, TaskFilters, TaskId, TaskPriority, TaskStatus,
        TeamId, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
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

/// Converts a stored row into a domain task.
///
/// Status and priority strings convert leniently so unrecognised stored
/// values degrade to their `Unknown` variants instead of failing the read.
fn to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        status: TaskStatus::from_raw(&row.status),
        priority: TaskPriority::from_raw(&row.priority),
        due_date: row.due_date,
        assigned_to: row.assigned_to.map(UserId::from_uuid),
        team_id: row.team_id.map(TeamId::from_uuid),
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Converts a domain task into an insert row with canonical storage strings.
fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        team_id: task.team_id().map(TeamId::into_inner),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

/// Converts a domain task into an update changeset.
fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        team_id: task.team_id().map(TeamId::into_inner),
        updated_at: task.updated_at(),
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

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(to_task))
        })
        .await
    }

    async fn list(
        &self,
        filters: &TaskFilters,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let filters = filters.clone();

        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();

            if let Some(needle) = filters.search() {
                query = query.filter(tasks::title.ilike(format!("%{needle}%")));
            }
            if !filters.statuses().is_empty() {
                let statuses: Vec<&'static str> =
                    filters.statuses().iter().map(|status| status.as_str()).collect();
                query = query.filter(tasks::status.eq_any(statuses));
            }
            if !filters.priorities().is_empty() {
                let priorities: Vec<&'static str> = filters
                    .priorities()
                    .iter()
                    .map(|priority| priority.as_str())
                    .collect();
                query = query.filter(tasks::priority.eq_any(priorities));
            }

            let rows = query
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            // The domain matcher stays authoritative: SQL narrows the scan,
            // assignee/team sentinels and relative date ranges are decided
            // here.
            Ok(rows
                .into_iter()
                .map(to_task)
                .filter(|task| filters.matches(task, now))
                .collect())
        })
        .await
    }

    async fn list_day_window(&self, windows: &DayWindows) -> TaskRepositoryResult<Vec<Task>> {
        let windows = *windows;

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .filter(
                    tasks::due_date
                        .ge(windows.start_of_yesterday())
                        .and(tasks::due_date.le(windows.end_of_week()))
                        .or(tasks::due_date
                            .lt(windows.start_of_today())
                            .and(tasks::status.ne(TaskStatus::Completed.as_str())))
                        .or(tasks::due_date
                            .is_null()
                            .and(tasks::status.ne(TaskStatus::Completed.as_str()))),
                )
                .order((
                    tasks::due_date.is_null(),
                    tasks::due_date.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(to_task).collect())
        })
        .await
    }
}
