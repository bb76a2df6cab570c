//! Error types for notification validation.

use thiserror::Error;

/// Errors returned while constructing notifications.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationDomainError {
    /// The message is empty after trimming.
    #[error("notification message must not be empty")]
    EmptyMessage,

    /// The type tag is empty after trimming.
    #[error("notification type must not be empty")]
    EmptyKind,
}
