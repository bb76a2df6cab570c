//! Feedback entries and their responses.

use super::{FeedbackDomainError, FeedbackId, FeedbackResponseId};
use crate::submission::domain::SubmissionId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Feedback left on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    id: FeedbackId,
    submission_id: SubmissionId,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing persisted feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFeedbackData {
    /// Persisted identifier.
    pub id: FeedbackId,
    /// Persisted submission reference.
    pub submission_id: SubmissionId,
    /// Persisted text.
    pub content: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Writes new feedback on a submission.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackDomainError::EmptyContent`] when the text is blank.
    pub fn new(
        submission_id: SubmissionId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FeedbackDomainError> {
        let text = validate_content(content.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: FeedbackId::new(),
            submission_id,
            content: text,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs feedback from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFeedbackData) -> Self {
        Self {
            id: data.id,
            submission_id: data.submission_id,
            content: data.content,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the feedback identifier.
    #[must_use]
    pub const fn id(&self) -> FeedbackId {
        self.id
    }

    /// Returns the submission the feedback refers to.
    #[must_use]
    pub const fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    /// Returns the text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the text.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackDomainError::EmptyContent`] when the text is blank.
    pub fn revise(
        &mut self,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), FeedbackDomainError> {
        self.content = validate_content(content.into())?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// A reply to feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    id: FeedbackResponseId,
    feedback_id: FeedbackId,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFeedbackResponseData {
    /// Persisted identifier.
    pub id: FeedbackResponseId,
    /// Persisted parent feedback.
    pub feedback_id: FeedbackId,
    /// Persisted text.
    pub content: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl FeedbackResponse {
    /// Writes a reply to feedback.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackDomainError::EmptyContent`] when the text is blank.
    pub fn new(
        feedback_id: FeedbackId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, FeedbackDomainError> {
        let text = validate_content(content.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: FeedbackResponseId::new(),
            feedback_id,
            content: text,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a response from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFeedbackResponseData) -> Self {
        Self {
            id: data.id,
            feedback_id: data.feedback_id,
            content: data.content,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the response identifier.
    #[must_use]
    pub const fn id(&self) -> FeedbackResponseId {
        self.id
    }

    /// Returns the parent feedback.
    #[must_use]
    pub const fn feedback_id(&self) -> FeedbackId {
        self.feedback_id
    }

    /// Returns the text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the text.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackDomainError::EmptyContent`] when the text is blank.
    pub fn revise(
        &mut self,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), FeedbackDomainError> {
        self.content = validate_content(content.into())?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn validate_content(content: String) -> Result<String, FeedbackDomainError> {
    if content.trim().is_empty() {
        return Err(FeedbackDomainError::EmptyContent);
    }
    Ok(content)
}
