//! Repository port for submission persistence.

use crate::directory::domain::UserId;
use crate::notification::domain::{Notification, NotificationId};
use crate::persistence::FromPersistence;
use crate::submission::domain::{Submission, SubmissionId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for submission repository operations.
pub type SubmissionRepositoryResult<T> = Result<T, SubmissionRepositoryError>;

/// Submission persistence contract.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Stores a submission together with the notification it raises.
    ///
    /// Either both records are stored or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionRepositoryError::DuplicateSubmission`] or
    /// [`SubmissionRepositoryError::DuplicateNotification`] when an ID is
    /// already taken, or a persistence error.
    async fn store_with_notification(
        &self,
        submission: &Submission,
        notification: &Notification,
    ) -> SubmissionRepositoryResult<()>;

    /// Finds a submission by identifier.
    async fn find_by_id(&self, id: SubmissionId) -> SubmissionRepositoryResult<Option<Submission>>;

    /// Returns every submission, oldest first.
    async fn list_all(&self) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Returns the submissions made against a task, oldest first.
    async fn list_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<Vec<Submission>>;

    /// Returns one user's submissions against a task, oldest first.
    async fn list_by_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> SubmissionRepositoryResult<Vec<Submission>>;
}

/// Errors returned by submission repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SubmissionRepositoryError {
    /// A submission with the same identifier already exists.
    #[error("duplicate submission identifier: {0}")]
    DuplicateSubmission(SubmissionId),

    /// The accompanying notification's identifier is already taken.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl FromPersistence for SubmissionRepositoryError {
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}
