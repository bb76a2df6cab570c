//! Project status and its transition table.

use super::ParseProjectStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Work is ongoing. Every project starts here.
    InProgress,
    /// Work finished.
    Completed,
    /// Work was abandoned.
    Canceled,
}

/// Every legal `(from, to)` status change. Anything absent is rejected.
///
/// `Completed -> Canceled` is listed while `Canceled -> Completed` is not.
pub const ALLOWED_TRANSITIONS: [(ProjectStatus, ProjectStatus); 3] = [
    (ProjectStatus::InProgress, ProjectStatus::Completed),
    (ProjectStatus::InProgress, ProjectStatus::Canceled),
    (ProjectStatus::Completed, ProjectStatus::Canceled),
];

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Returns `true` when `(self, target)` is in [`ALLOWED_TRANSITIONS`].
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        ALLOWED_TRANSITIONS.contains(&(self, target))
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}
