//! Notification entity.

use super::{NotificationDomainError, NotificationId};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Message sent to a user whenever they make a submission.
pub const SUBMISSION_RECEIVED_MESSAGE: &str = "Se ha realizado una nueva entrega.";

/// Type tag of submission notifications.
pub const SUBMISSION_RECEIVED_KIND: &str = "ENTREGA";

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    message: String,
    kind: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub user_id: UserId,
    /// Persisted message.
    pub message: String,
    /// Persisted type tag.
    pub kind: String,
    /// Persisted read flag.
    pub is_read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError`] when the message or type tag is
    /// blank.
    pub fn new(
        user_id: UserId,
        message: impl Into<String>,
        kind: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, NotificationDomainError> {
        let message_text = message.into();
        let kind_tag = kind.into();
        if message_text.trim().is_empty() {
            return Err(NotificationDomainError::EmptyMessage);
        }
        if kind_tag.trim().is_empty() {
            return Err(NotificationDomainError::EmptyKind);
        }
        Ok(Self::unread(user_id, message_text, kind_tag, clock))
    }

    /// Creates the notification raised when `user_id` makes a submission.
    #[must_use]
    pub fn submission_received(user_id: UserId, clock: &impl Clock) -> Self {
        Self::unread(
            user_id,
            SUBMISSION_RECEIVED_MESSAGE.to_owned(),
            SUBMISSION_RECEIVED_KIND.to_owned(),
            clock,
        )
    }

    fn unread(user_id: UserId, message: String, kind: String, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            message,
            kind,
            is_read: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            message: data.message,
            kind: data.kind,
            is_read: data.is_read,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the type tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns `true` once the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification read. Returns `false` when it already was.
    pub const fn mark_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }
}
