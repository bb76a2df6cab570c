//! Repository port for feedback and responses.

use crate::feedback::domain::{Feedback, FeedbackId, FeedbackResponse, FeedbackResponseId};
use crate::persistence::FromPersistence;
use crate::submission::domain::SubmissionId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for feedback repository operations.
pub type FeedbackRepositoryResult<T> = Result<T, FeedbackRepositoryError>;

/// Persistence contract for feedback threads.
///
/// Lists are ordered oldest first.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Stores new feedback.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::DuplicateFeedback`] when the ID
    /// already exists.
    async fn store_feedback(&self, feedback: &Feedback) -> FeedbackRepositoryResult<()>;

    /// Persists revised feedback.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::FeedbackNotFound`] when absent.
    async fn update_feedback(&self, feedback: &Feedback) -> FeedbackRepositoryResult<()>;

    /// Deletes feedback together with its responses.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::FeedbackNotFound`] when absent.
    async fn delete_feedback(&self, id: FeedbackId) -> FeedbackRepositoryResult<()>;

    /// Finds feedback by identifier.
    async fn find_feedback(&self, id: FeedbackId) -> FeedbackRepositoryResult<Option<Feedback>>;

    /// Returns all feedback.
    async fn list_feedback(&self) -> FeedbackRepositoryResult<Vec<Feedback>>;

    /// Returns the feedback left on one submission.
    async fn list_feedback_for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> FeedbackRepositoryResult<Vec<Feedback>>;

    /// Stores a new response.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::DuplicateResponse`] when the ID
    /// already exists.
    async fn store_response(&self, response: &FeedbackResponse) -> FeedbackRepositoryResult<()>;

    /// Persists a revised response.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::ResponseNotFound`] when absent.
    async fn update_response(&self, response: &FeedbackResponse) -> FeedbackRepositoryResult<()>;

    /// Deletes a response.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::ResponseNotFound`] when absent.
    async fn delete_response(&self, id: FeedbackResponseId) -> FeedbackRepositoryResult<()>;

    /// Finds a response by identifier.
    async fn find_response(
        &self,
        id: FeedbackResponseId,
    ) -> FeedbackRepositoryResult<Option<FeedbackResponse>>;

    /// Returns all responses.
    async fn list_responses(&self) -> FeedbackRepositoryResult<Vec<FeedbackResponse>>;
}

/// Errors returned by feedback repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FeedbackRepositoryError {
    /// Feedback with the same identifier already exists.
    #[error("duplicate feedback identifier: {0}")]
    DuplicateFeedback(FeedbackId),

    /// A response with the same identifier already exists.
    #[error("duplicate feedback response identifier: {0}")]
    DuplicateResponse(FeedbackResponseId),

    /// The feedback was not found.
    #[error("feedback not found: {0}")]
    FeedbackNotFound(FeedbackId),

    /// The response was not found.
    #[error("feedback response not found: {0}")]
    ResponseNotFound(FeedbackResponseId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FeedbackRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl FromPersistence for FeedbackRepositoryError {
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}
