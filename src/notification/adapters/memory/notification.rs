//! In-memory notification repository for tests and embedding.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};

pub(crate) type NotificationTable = HashMap<NotificationId, Notification>;

/// Thread-safe in-memory notification repository.
///
/// Clones share one store. The in-memory submission repository writes
/// through the same store to commit a submission and its notification
/// together.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<NotificationTable>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shared_state(&self) -> Arc<RwLock<NotificationTable>> {
        Arc::clone(&self.state)
    }
}

fn poisoned(err: impl ToString) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.state.write().map_err(poisoned)?;
        if notifications.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        notifications.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.state.write().map_err(poisoned)?;
        let slot = notifications
            .get_mut(&notification.id())
            .ok_or(NotificationRepositoryError::NotFound(notification.id()))?;
        *slot = notification.clone();
        Ok(())
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        let mut notifications = self.state.write().map_err(poisoned)?;
        notifications
            .remove(&id)
            .map(|_| ())
            .ok_or(NotificationRepositoryError::NotFound(id))
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let notifications = self.state.read().map_err(poisoned)?;
        Ok(notifications.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let notifications = self.state.read().map_err(poisoned)?;
        let mut matching: Vec<Notification> = notifications
            .values()
            .filter(|notification| notification.user_id() == user_id)
            .cloned()
            .collect();
        matching.sort_by_key(|notification| Reverse(notification.created_at()));
        Ok(matching)
    }
}
