//! Task priority levels.

use super::{ParseTaskPriorityError, UNRANKED};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority level.
///
/// The [`TaskPriority::Unknown`] variant absorbs unrecognised values read
/// from persistence; ordering places it after every recognised level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Lowest urgency.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Raised urgency.
    High,
    /// Highest urgency.
    Urgent,
    /// Unrecognised priority value carried through from storage.
    #[serde(other)]
    Unknown,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
            Self::Unknown => "unknown",
        }
    }

    /// Converts a raw storage value, degrading unrecognised input to
    /// [`TaskPriority::Unknown`] instead of failing.
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Unknown,
        }
    }

    /// Returns the daily-plan ordering rank: `urgent` before `high` before
    /// `medium` before `low`, unrecognised values last.
    #[must_use]
    pub const fn schedule_rank(self) -> u16 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unknown => UNRANKED,
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match Self::from_raw(value) {
            Self::Unknown => Err(ParseTaskPriorityError(value.to_owned())),
            priority => Ok(priority),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
