//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Completion status as stored.
    pub status: String,
    /// Priority level as stored.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Optional team reference.
    pub team_id: Option<uuid::Uuid>,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Completion status in canonical storage form.
    pub status: String,
    /// Priority level in canonical storage form.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Optional team reference.
    pub team_id: Option<uuid::Uuid>,
    /// Creator reference.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for task records.
///
/// `None` values clear their nullable columns, keeping stored rows a full
/// image of the aggregate.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Completion status in canonical storage form.
    pub status: String,
    /// Priority level in canonical storage form.
    pub priority: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee reference.
    pub assigned_to: Option<uuid::Uuid>,
    /// Optional team reference.
    pub team_id: Option<uuid::Uuid>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
