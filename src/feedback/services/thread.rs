//! CRUD over feedback and responses.

use crate::error::{Classify, FailureKind};
use crate::feedback::{
    domain::{Feedback, FeedbackDomainError, FeedbackId, FeedbackResponse, FeedbackResponseId},
    ports::{FeedbackRepository, FeedbackRepositoryError},
};
use crate::lookup::{EntityKind, NotFoundError, ResolveError, resolve};
use crate::submission::{
    domain::SubmissionId,
    ports::{SubmissionRepository, SubmissionRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for feedback operations.
#[derive(Debug, Error)]
pub enum FeedbackServiceError {
    /// Content validation failed.
    #[error(transparent)]
    Domain(#[from] FeedbackDomainError),
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Feedback repository operation failed.
    #[error(transparent)]
    Repository(#[from] FeedbackRepositoryError),
    /// Submission lookup failed.
    #[error(transparent)]
    Submission(#[from] SubmissionRepositoryError),
}

impl<E> From<ResolveError<E>> for FeedbackServiceError
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

impl Classify for FeedbackServiceError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) => FailureKind::Validation,
            Self::NotFound(_)
            | Self::Repository(
                FeedbackRepositoryError::FeedbackNotFound(_)
                | FeedbackRepositoryError::ResponseNotFound(_),
            ) => FailureKind::NotFound,
            Self::Repository(
                FeedbackRepositoryError::DuplicateFeedback(_)
                | FeedbackRepositoryError::DuplicateResponse(_),
            ) => FailureKind::Conflict,
            Self::Repository(FeedbackRepositoryError::Persistence(_)) | Self::Submission(_) => {
                FailureKind::Storage
            }
        }
    }
}

/// Result type for feedback service operations.
pub type FeedbackServiceResult<T> = Result<T, FeedbackServiceError>;

/// Feedback thread service.
#[derive(Clone)]
pub struct FeedbackService<F, S, C>
where
    F: FeedbackRepository,
    S: SubmissionRepository,
    C: Clock + Send + Sync,
{
    threads: Arc<F>,
    submissions: Arc<S>,
    clock: Arc<C>,
}

impl<F, S, C> FeedbackService<F, S, C>
where
    F: FeedbackRepository,
    S: SubmissionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new feedback service.
    #[must_use]
    pub const fn new(threads: Arc<F>, submissions: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            threads,
            submissions,
            clock,
        }
    }

    /// Leaves feedback on an existing submission.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::Domain`] for blank content and
    /// [`FeedbackServiceError::NotFound`] when the submission does not exist.
    pub async fn create_feedback(
        &self,
        submission_id: SubmissionId,
        content: impl Into<String>,
    ) -> FeedbackServiceResult<Feedback> {
        let entry = Feedback::new(submission_id, content, &*self.clock)?;
        self.require_submission(submission_id).await?;
        self.threads.store_feedback(&entry).await?;
        info!(feedback_id = %entry.id(), submission_id = %submission_id, "feedback created");
        Ok(entry)
    }

    /// Replaces the text of existing feedback.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the feedback does not
    /// exist and [`FeedbackServiceError::Domain`] for blank content.
    pub async fn update_feedback(
        &self,
        feedback_id: FeedbackId,
        content: impl Into<String>,
    ) -> FeedbackServiceResult<Feedback> {
        let mut entry = self.find_feedback(feedback_id).await?;
        entry.revise(content, &*self.clock)?;
        self.threads.update_feedback(&entry).await?;
        info!(feedback_id = %feedback_id, "feedback revised");
        Ok(entry)
    }

    /// Finds feedback by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the feedback does not
    /// exist.
    pub async fn find_feedback(&self, feedback_id: FeedbackId) -> FeedbackServiceResult<Feedback> {
        Ok(resolve(
            EntityKind::Feedback,
            feedback_id,
            self.threads.find_feedback(feedback_id),
        )
        .await?)
    }

    /// Returns all feedback.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::Repository`] when the lookup fails.
    pub async fn list_feedback(&self) -> FeedbackServiceResult<Vec<Feedback>> {
        Ok(self.threads.list_feedback().await?)
    }

    /// Returns the feedback left on a submission.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the submission does
    /// not exist.
    pub async fn list_feedback_for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> FeedbackServiceResult<Vec<Feedback>> {
        self.require_submission(submission_id).await?;
        Ok(self
            .threads
            .list_feedback_for_submission(submission_id)
            .await?)
    }

    /// Deletes feedback and its responses.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the feedback does not
    /// exist.
    pub async fn delete_feedback(&self, feedback_id: FeedbackId) -> FeedbackServiceResult<()> {
        self.threads
            .delete_feedback(feedback_id)
            .await
            .map_err(|err| match err {
                FeedbackRepositoryError::FeedbackNotFound(_) => {
                    FeedbackServiceError::NotFound(NotFoundError::new(
                        EntityKind::Feedback,
                        feedback_id,
                    ))
                }
                other => FeedbackServiceError::from(other),
            })?;
        info!(feedback_id = %feedback_id, "feedback deleted");
        Ok(())
    }

    /// Replies to existing feedback.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::Domain`] for blank content and
    /// [`FeedbackServiceError::NotFound`] when the feedback does not exist.
    pub async fn create_response(
        &self,
        feedback_id: FeedbackId,
        content: impl Into<String>,
    ) -> FeedbackServiceResult<FeedbackResponse> {
        let response = FeedbackResponse::new(feedback_id, content, &*self.clock)?;
        self.find_feedback(feedback_id).await?;
        self.threads.store_response(&response).await?;
        info!(
            response_id = %response.id(),
            feedback_id = %feedback_id,
            "feedback response created"
        );
        Ok(response)
    }

    /// Replaces the text of an existing response.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the response does not
    /// exist and [`FeedbackServiceError::Domain`] for blank content.
    pub async fn update_response(
        &self,
        response_id: FeedbackResponseId,
        content: impl Into<String>,
    ) -> FeedbackServiceResult<FeedbackResponse> {
        let mut response = self.find_response(response_id).await?;
        response.revise(content, &*self.clock)?;
        self.threads.update_response(&response).await?;
        info!(response_id = %response_id, "feedback response revised");
        Ok(response)
    }

    /// Finds a response by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the response does not
    /// exist.
    pub async fn find_response(
        &self,
        response_id: FeedbackResponseId,
    ) -> FeedbackServiceResult<FeedbackResponse> {
        Ok(resolve(
            EntityKind::FeedbackResponse,
            response_id,
            self.threads.find_response(response_id),
        )
        .await?)
    }

    /// Returns all responses.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::Repository`] when the lookup fails.
    pub async fn list_responses(&self) -> FeedbackServiceResult<Vec<FeedbackResponse>> {
        Ok(self.threads.list_responses().await?)
    }

    /// Deletes a response.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackServiceError::NotFound`] when the response does not
    /// exist.
    pub async fn delete_response(
        &self,
        response_id: FeedbackResponseId,
    ) -> FeedbackServiceResult<()> {
        self.threads
            .delete_response(response_id)
            .await
            .map_err(|err| match err {
                FeedbackRepositoryError::ResponseNotFound(_) => {
                    FeedbackServiceError::NotFound(NotFoundError::new(
                        EntityKind::FeedbackResponse,
                        response_id,
                    ))
                }
                other => FeedbackServiceError::from(other),
            })?;
        info!(response_id = %response_id, "feedback response deleted");
        Ok(())
    }

    async fn require_submission(&self, submission_id: SubmissionId) -> FeedbackServiceResult<()> {
        resolve(
            EntityKind::Submission,
            submission_id,
            self.submissions.find_by_id(submission_id),
        )
        .await?;
        Ok(())
    }
}
