//! Error types for feedback validation.

use thiserror::Error;

/// Errors returned while writing feedback or responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedbackDomainError {
    /// The text is empty after trimming.
    #[error("feedback content must not be empty")]
    EmptyContent,
}
