//! Error types for project validation and lifecycle transitions.

use super::{ProjectId, ProjectStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// No start date was supplied.
    #[error("project start date is required")]
    MissingStartDate,

    /// No end date was supplied.
    #[error("project end date is required")]
    MissingEndDate,

    /// The end date falls before the start date.
    #[error("project end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The requested status change is not in the transition table.
    #[error("invalid status transition for project {project_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Project whose transition was rejected.
        project_id: ProjectId,
        /// Current status.
        from: ProjectStatus,
        /// Requested status.
        to: ProjectStatus,
    },
}

impl ProjectDomainError {
    /// Returns `true` for lifecycle rejections, as opposed to input
    /// validation failures.
    #[must_use]
    pub const fn is_transition_rejection(&self) -> bool {
        matches!(self, Self::InvalidStatusTransition { .. })
    }
}

/// Error returned while parsing a project status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
