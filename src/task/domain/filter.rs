//! Multi-field task filtering.
//!
//! Mirrors the task-board filter panel: free-text title search, status and
//! priority sets, assignee and team sets with explicit "unassigned" and
//! "unteamed" sentinels, and a relative due-date range. Matching is pure and
//! evaluated against an explicit reference instant, using the same
//! calendar-day semantics as the daily plan.

use super::{DayWindows, Task, TaskPriority, TaskStatus, TeamId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Assignee constraint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeFilter {
    /// Tasks assigned to the given user.
    User(UserId),
    /// Tasks with no assignee.
    Unassigned,
}

/// Team constraint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamFilter {
    /// Tasks owned by the given team.
    Team(TeamId),
    /// Tasks outside any team.
    Unteamed,
}

/// Relative due-date constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueDateFilter {
    /// No due-date constraint.
    #[default]
    All,
    /// Due on the current calendar day.
    Today,
    /// Due strictly after the start of today and strictly before the end of
    /// the week.
    ThisWeek,
    /// Due strictly before the start of today and not completed.
    Overdue,
    /// No due date at all.
    Undated,
}

/// Combined task-list filter.
///
/// Empty sets place no constraint on their field; all constraints that are
/// present must hold for a task to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilters {
    search: Option<String>,
    statuses: Vec<TaskStatus>,
    priorities: Vec<TaskPriority>,
    assignees: Vec<AssigneeFilter>,
    teams: Vec<TeamFilter>,
    due_date: DueDateFilter,
}

impl TaskFilters {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the case-insensitive title search; blank input clears it.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let value = search.into();
        let normalized = value.trim();
        self.search = (!normalized.is_empty()).then(|| normalized.to_ascii_lowercase());
        self
    }

    /// Sets the accepted statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Sets the accepted priorities.
    #[must_use]
    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = TaskPriority>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self
    }

    /// Sets the accepted assignee entries.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = AssigneeFilter>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Sets the accepted team entries.
    #[must_use]
    pub fn with_teams(mut self, teams: impl IntoIterator<Item = TeamFilter>) -> Self {
        self.teams = teams.into_iter().collect();
        self
    }

    /// Sets the relative due-date constraint.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDateFilter) -> Self {
        self.due_date = due_date;
        self
    }

    /// Returns the normalized search needle, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the accepted statuses.
    #[must_use]
    pub fn statuses(&self) -> &[TaskStatus] {
        &self.statuses
    }

    /// Returns the accepted priorities.
    #[must_use]
    pub fn priorities(&self) -> &[TaskPriority] {
        &self.priorities
    }

    /// Returns the accepted assignee entries.
    #[must_use]
    pub fn assignees(&self) -> &[AssigneeFilter] {
        &self.assignees
    }

    /// Returns the accepted team entries.
    #[must_use]
    pub fn teams(&self) -> &[TeamFilter] {
        &self.teams
    }

    /// Returns the relative due-date constraint.
    #[must_use]
    pub const fn due_date(&self) -> DueDateFilter {
        self.due_date
    }

    /// Returns whether `task` satisfies every present constraint, judging
    /// relative dates against `now`.
    #[must_use]
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.matches_search(task)
            && self.matches_status(task)
            && self.matches_priority(task)
            && self.matches_assignee(task)
            && self.matches_team(task)
            && self.matches_due_date(task, now)
    }

    fn matches_search(&self, task: &Task) -> bool {
        self.search
            .as_deref()
            .is_none_or(|needle| task.title().to_ascii_lowercase().contains(needle))
    }

    fn matches_status(&self, task: &Task) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&task.status())
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priorities.is_empty() || self.priorities.contains(&task.priority())
    }

    fn matches_assignee(&self, task: &Task) -> bool {
        self.assignees.is_empty()
            || self.assignees.iter().any(|entry| match entry {
                AssigneeFilter::User(user) => task.assigned_to() == Some(*user),
                AssigneeFilter::Unassigned => task.assigned_to().is_none(),
            })
    }

    fn matches_team(&self, task: &Task) -> bool {
        self.teams.is_empty()
            || self.teams.iter().any(|entry| match entry {
                TeamFilter::Team(team) => task.team_id() == Some(*team),
                TeamFilter::Unteamed => task.team_id().is_none(),
            })
    }

    fn matches_due_date(&self, task: &Task, now: DateTime<Utc>) -> bool {
        let windows = DayWindows::around(now);
        let due = task.due_date();
        match self.due_date {
            DueDateFilter::All => true,
            DueDateFilter::Today => {
                due.is_some_and(|date| date.date_naive() == windows.today_date())
            }
            DueDateFilter::ThisWeek => due.is_some_and(|date| {
                date > windows.start_of_today() && date < windows.end_of_week()
            }),
            DueDateFilter::Overdue => {
                !task.status().is_completed()
                    && due.is_some_and(|date| date < windows.start_of_today())
            }
            DueDateFilter::Undated => due.is_none(),
        }
    }
}
