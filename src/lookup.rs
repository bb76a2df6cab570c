//! Resolve-or-fail lookup shared by every service that follows a reference.
//!
//! Repositories answer lookups with `Ok(None)` when a record is absent. The
//! services turn that absence into a [`NotFoundError`] naming the entity kind
//! and the key that failed to resolve, so a caller can tell a missing project
//! from a missing creator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Kinds of entity that can be referenced by another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A platform user.
    User,
    /// A team attached to a project.
    Team,
    /// A course project.
    Project,
    /// A task inside a project.
    Task,
    /// A submission made against a task.
    Submission,
    /// A user notification.
    Notification,
    /// Feedback left on a submission.
    Feedback,
    /// A reply to feedback.
    FeedbackResponse,
}

impl EntityKind {
    /// Returns a stable lower-case name for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "team",
            Self::Project => "project",
            Self::Task => "task",
            Self::Submission => "submission",
            Self::Notification => "notification",
            Self::Feedback => "feedback",
            Self::FeedbackResponse => "feedback response",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A referenced entity does not exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} not found: {key}")]
pub struct NotFoundError {
    /// Kind of the missing entity.
    pub kind: EntityKind,
    /// Identifier or natural key that failed to resolve.
    pub key: String,
}

impl NotFoundError {
    /// Creates a not-found error for the given kind and key.
    #[must_use]
    pub fn new(kind: EntityKind, key: impl fmt::Display) -> Self {
        Self {
            kind,
            key: key.to_string(),
        }
    }
}

/// Failure of a resolve-or-fail lookup.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The lookup succeeded but found nothing.
    #[error(transparent)]
    NotFound(NotFoundError),
    /// The underlying repository failed.
    #[error(transparent)]
    Lookup(E),
}

/// Awaits a repository lookup and fails when it yields no record.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] naming `kind` and `key` when the lookup
/// yields `None`, or [`ResolveError::Lookup`] when the lookup itself fails.
pub async fn resolve<T, E, F>(
    kind: EntityKind,
    key: impl fmt::Display,
    lookup: F,
) -> Result<T, ResolveError<E>>
where
    F: Future<Output = Result<Option<T>, E>>,
{
    match lookup.await {
        Ok(Some(entity)) => Ok(entity),
        Ok(None) => Err(ResolveError::NotFound(NotFoundError::new(kind, key))),
        Err(err) => Err(ResolveError::Lookup(err)),
    }
}
