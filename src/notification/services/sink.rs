//! Service layer for creating, reading, and deleting notifications.

use crate::directory::{
    domain::{DirectoryDomainError, Email, UserId},
    ports::{DirectoryRepositoryError, UserRepository},
};
use crate::error::{Classify, FailureKind};
use crate::lookup::{EntityKind, NotFoundError, ResolveError, resolve};
use crate::notification::{
    domain::{Notification, NotificationDomainError, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for notification operations.
#[derive(Debug, Error)]
pub enum NotificationSinkError {
    /// Notification validation failed.
    #[error(transparent)]
    Domain(#[from] NotificationDomainError),
    /// The recipient's email is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] DirectoryDomainError),
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Notification repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

impl<E> From<ResolveError<E>> for NotificationSinkError
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

impl Classify for NotificationSinkError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) | Self::InvalidEmail(_) => FailureKind::Validation,
            Self::NotFound(_) | Self::Repository(NotificationRepositoryError::NotFound(_)) => {
                FailureKind::NotFound
            }
            Self::Repository(NotificationRepositoryError::DuplicateNotification(_)) => {
                FailureKind::Conflict
            }
            Self::Repository(NotificationRepositoryError::Persistence(_)) | Self::Directory(_) => {
                FailureKind::Storage
            }
        }
    }
}

/// Result type for notification sink operations.
pub type NotificationSinkResult<T> = Result<T, NotificationSinkError>;

/// Notification orchestration service.
#[derive(Clone)]
pub struct NotificationSinkService<N, U, C>
where
    N: NotificationRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    notifications: Arc<N>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<N, U, C> NotificationSinkService<N, U, C>
where
    N: NotificationRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new notification sink.
    #[must_use]
    pub const fn new(notifications: Arc<N>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            notifications,
            users,
            clock,
        }
    }

    /// Creates an unread notification for an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError::Domain`] when the message or type is
    /// blank and [`NotificationSinkError::NotFound`] when the user does not
    /// exist.
    pub async fn create(
        &self,
        user_id: UserId,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> NotificationSinkResult<Notification> {
        let notification = Notification::new(user_id, message, kind, &*self.clock)?;
        resolve(EntityKind::User, user_id, self.users.find_by_id(user_id)).await?;
        self.notifications.store(&notification).await?;
        info!(
            notification_id = %notification.id(),
            user_id = %user_id,
            kind = notification.kind(),
            "notification created"
        );
        Ok(notification)
    }

    /// Marks a notification read. Marking it again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError::NotFound`] when the notification
    /// does not exist.
    pub async fn mark_as_read(
        &self,
        notification_id: NotificationId,
    ) -> NotificationSinkResult<Notification> {
        let mut notification = self.find_by_id(notification_id).await?;
        if notification.mark_read() {
            self.notifications.update(&notification).await?;
            info!(notification_id = %notification_id, "notification marked read");
        } else {
            debug!(notification_id = %notification_id, "notification already read");
        }
        Ok(notification)
    }

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError::NotFound`] when the notification
    /// does not exist.
    pub async fn delete(&self, notification_id: NotificationId) -> NotificationSinkResult<()> {
        match self.notifications.delete(notification_id).await {
            Ok(()) => {
                info!(notification_id = %notification_id, "notification deleted");
                Ok(())
            }
            Err(NotificationRepositoryError::NotFound(_)) => Err(NotFoundError::new(
                EntityKind::Notification,
                notification_id,
            )
            .into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the notifications of the user registered under `email`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError::NotFound`] when nobody is registered
    /// under the email.
    pub async fn list_for_user(&self, email: &str) -> NotificationSinkResult<Vec<Notification>> {
        let normalized = Email::new(email)?;
        let user = resolve(
            EntityKind::User,
            &normalized,
            self.users.find_by_email(&normalized),
        )
        .await?;
        Ok(self.notifications.list_for_user(user.id()).await?)
    }

    /// Finds a notification by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError::NotFound`] when the notification
    /// does not exist.
    pub async fn find_by_id(
        &self,
        notification_id: NotificationId,
    ) -> NotificationSinkResult<Notification> {
        Ok(resolve(
            EntityKind::Notification,
            notification_id,
            self.notifications.find_by_id(notification_id),
        )
        .await?)
    }
}
