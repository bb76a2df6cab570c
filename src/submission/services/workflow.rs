//! Service layer for handing in work and reading it back.

use crate::directory::{
    domain::{DirectoryDomainError, Email},
    ports::{DirectoryRepositoryError, UserRepository},
};
use crate::error::{Classify, FailureKind};
use crate::lookup::{EntityKind, NotFoundError, ResolveError, resolve};
use crate::notification::domain::Notification;
use crate::submission::{
    domain::{AdministrativeAccess, NewSubmission, Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for submission operations.
#[derive(Debug, Error)]
pub enum SubmissionWorkflowError {
    /// The caller's email is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] DirectoryDomainError),
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Submission repository operation failed.
    #[error(transparent)]
    Repository(#[from] SubmissionRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

impl<E> From<ResolveError<E>> for SubmissionWorkflowError
where
    E: Into<Self>,
{
    fn from(err: ResolveError<E>) -> Self {
        match err {
            ResolveError::NotFound(missing) => Self::NotFound(missing),
            ResolveError::Lookup(inner) => inner.into(),
        }
    }
}

impl Classify for SubmissionWorkflowError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::InvalidEmail(_) => FailureKind::Validation,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Repository(
                SubmissionRepositoryError::DuplicateSubmission(_)
                | SubmissionRepositoryError::DuplicateNotification(_),
            ) => FailureKind::Conflict,
            Self::Repository(SubmissionRepositoryError::Persistence(_))
            | Self::Task(_)
            | Self::Directory(_) => FailureKind::Storage,
        }
    }
}

/// Result type for submission workflow operations.
pub type SubmissionWorkflowResult<T> = Result<T, SubmissionWorkflowError>;

/// Submission orchestration service.
#[derive(Clone)]
pub struct SubmissionWorkflowService<S, K, U, C>
where
    S: SubmissionRepository,
    K: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    submissions: Arc<S>,
    tasks: Arc<K>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<S, K, U, C> SubmissionWorkflowService<S, K, U, C>
where
    S: SubmissionRepository,
    K: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new submission workflow service.
    #[must_use]
    pub const fn new(submissions: Arc<S>, tasks: Arc<K>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            submissions,
            tasks,
            users,
            clock,
        }
    }

    /// Accepts a submission and notifies the submitting user.
    ///
    /// The submission and its `ENTREGA` notification are committed together.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionWorkflowError::NotFound`] naming the task or the
    /// user when either does not exist, and
    /// [`SubmissionWorkflowError::Repository`] when the combined write
    /// fails; nothing is stored in that case.
    pub async fn create(&self, input: NewSubmission) -> SubmissionWorkflowResult<Submission> {
        let task_id = input.task_id();
        let user_id = input.user_id();
        let task = resolve(EntityKind::Task, task_id, self.tasks.find_by_id(task_id)).await?;
        let user = resolve(EntityKind::User, user_id, self.users.find_by_id(user_id)).await?;

        let submission = Submission::accept(input, &*self.clock);
        let notification = Notification::submission_received(user.id(), &*self.clock);
        self.submissions
            .store_with_notification(&submission, &notification)
            .await?;
        info!(
            submission_id = %submission.id(),
            task_id = %task.id(),
            user_id = %user.id(),
            notification_id = %notification.id(),
            "submission accepted"
        );
        Ok(submission)
    }

    /// Returns the task's submissions as seen by the user with `email`.
    ///
    /// Teachers see every submission of the task; everyone else sees only
    /// their own.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionWorkflowError::NotFound`] when the user or task
    /// does not exist.
    pub async fn submissions_by_task(
        &self,
        task_id: TaskId,
        email: &str,
    ) -> SubmissionWorkflowResult<Vec<Submission>> {
        let normalized = Email::new(email)?;
        let user = resolve(
            EntityKind::User,
            &normalized,
            self.users.find_by_email(&normalized),
        )
        .await?;
        resolve(EntityKind::Task, task_id, self.tasks.find_by_id(task_id)).await?;

        if user.role().has_full_visibility() {
            return Ok(self.submissions.list_by_task(task_id).await?);
        }
        debug!(
            task_id = %task_id,
            user_id = %user.id(),
            role = %user.role(),
            "restricting submissions to caller"
        );
        Ok(self
            .submissions
            .list_by_task_and_user(task_id, user.id())
            .await?)
    }

    /// Finds a submission by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionWorkflowError::NotFound`] when the submission
    /// does not exist.
    pub async fn find_by_id(
        &self,
        submission_id: SubmissionId,
    ) -> SubmissionWorkflowResult<Submission> {
        Ok(resolve(
            EntityKind::Submission,
            submission_id,
            self.submissions.find_by_id(submission_id),
        )
        .await?)
    }

    /// Returns every submission on the platform.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionWorkflowError::Repository`] when the lookup
    /// fails.
    pub async fn list_all(
        &self,
        _access: AdministrativeAccess,
    ) -> SubmissionWorkflowResult<Vec<Submission>> {
        Ok(self.submissions.list_all().await?)
    }
}
