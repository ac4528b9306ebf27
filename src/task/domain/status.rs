//! Task completion status.

use super::{ParseTaskStatusError, UNRANKED};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task completion status.
///
/// The [`TaskStatus::Unknown`] variant absorbs unrecognised values read from
/// persistence; classification treats it as "not completed" and ordering
/// places it last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
    /// Unrecognised status value carried through from storage.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    /// Converts a raw storage value, degrading unrecognised input to
    /// [`TaskStatus::Unknown`] instead of failing.
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Unknown,
        }
    }

    /// Returns whether the status counts as completed.
    ///
    /// Any other value, recognised or not, counts as "not completed".
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the daily-plan ordering rank: `pending` before `in_progress`
    /// before `completed`, unrecognised values last.
    #[must_use]
    pub const fn schedule_rank(self) -> u16 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::Unknown => UNRANKED,
        }
    }

    /// Returns whether a status change to `to` is permitted.
    ///
    /// The product allows free movement between concrete statuses, including
    /// reopening completed work; only no-op moves and moves touching
    /// [`TaskStatus::Unknown`] are rejected.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        match (self, to) {
            (Self::Unknown, _)
            | (_, Self::Unknown)
            | (Self::Pending, Self::Pending)
            | (Self::InProgress, Self::InProgress)
            | (Self::Completed, Self::Completed) => false,
            _ => true,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match Self::from_raw(value) {
            Self::Unknown => Err(ParseTaskStatusError(value.to_owned())),
            status => Ok(status),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
