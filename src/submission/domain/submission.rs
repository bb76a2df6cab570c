//! Submission entity.

use super::SubmissionId;
use crate::directory::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for a new submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    task_id: TaskId,
    user_id: UserId,
    content: String,
    file_ref: Option<String>,
}

impl NewSubmission {
    /// Creates input for a submission by `user_id` against `task_id`.
    #[must_use]
    pub fn new(task_id: TaskId, user_id: UserId, content: impl Into<String>) -> Self {
        Self {
            task_id,
            user_id,
            content: content.into(),
            file_ref: None,
        }
    }

    /// Attaches a reference to an uploaded file.
    #[must_use]
    pub fn with_file_ref(mut self, file_ref: impl Into<String>) -> Self {
        self.file_ref = Some(file_ref.into());
        self
    }

    /// Returns the task submitted against.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Work handed in for a task. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    content: String,
    file_ref: Option<String>,
    submitted_at: DateTime<Utc>,
    task_id: TaskId,
    user_id: UserId,
}

/// Parameter object for reconstructing a persisted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubmissionData {
    /// Persisted identifier.
    pub id: SubmissionId,
    /// Persisted content.
    pub content: String,
    /// Persisted file reference.
    pub file_ref: Option<String>,
    /// Persisted acceptance timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Persisted task.
    pub task_id: TaskId,
    /// Persisted submitting user.
    pub user_id: UserId,
}

impl Submission {
    /// Accepts a submission, stamping `submitted_at` from `clock`.
    #[must_use]
    pub fn accept(input: NewSubmission, clock: &impl Clock) -> Self {
        Self {
            id: SubmissionId::new(),
            content: input.content,
            file_ref: input.file_ref,
            submitted_at: clock.utc(),
            task_id: input.task_id,
            user_id: input.user_id,
        }
    }

    /// Reconstructs a submission from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubmissionData) -> Self {
        Self {
            id: data.id,
            content: data.content,
            file_ref: data.file_ref,
            submitted_at: data.submitted_at,
            task_id: data.task_id,
            user_id: data.user_id,
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the submitted content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the file reference, if any.
    #[must_use]
    pub fn file_ref(&self) -> Option<&str> {
        self.file_ref.as_deref()
    }

    /// Returns when the submission was accepted.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Returns the task submitted against.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}
