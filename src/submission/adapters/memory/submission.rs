//! In-memory submission repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::UserId;
use crate::notification::{
    adapters::memory::{InMemoryNotificationRepository, NotificationTable},
    domain::Notification,
};
use crate::submission::{
    domain::{Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory submission repository.
///
/// Notifications are written into the store of the
/// [`InMemoryNotificationRepository`] passed at construction. Both stores
/// are locked for the whole write, notifications first.
#[derive(Debug, Clone)]
pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<HashMap<SubmissionId, Submission>>>,
    notifications: Arc<RwLock<NotificationTable>>,
}

impl InMemorySubmissionRepository {
    /// Creates an empty repository that shares `notifications`' store.
    #[must_use]
    pub fn new(notifications: &InMemoryNotificationRepository) -> Self {
        Self {
            submissions: Arc::default(),
            notifications: notifications.shared_state(),
        }
    }

    fn collect_sorted(
        &self,
        predicate: impl Fn(&Submission) -> bool,
    ) -> SubmissionRepositoryResult<Vec<Submission>> {
        let submissions = self.submissions.read().map_err(poisoned)?;
        let mut matching: Vec<Submission> = submissions
            .values()
            .filter(|submission| predicate(submission))
            .cloned()
            .collect();
        matching.sort_by_key(Submission::submitted_at);
        Ok(matching)
    }
}

fn poisoned(err: impl ToString) -> SubmissionRepositoryError {
    SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn store_with_notification(
        &self,
        submission: &Submission,
        notification: &Notification,
    ) -> SubmissionRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        let mut submissions = self.submissions.write().map_err(poisoned)?;
        if submissions.contains_key(&submission.id()) {
            return Err(SubmissionRepositoryError::DuplicateSubmission(
                submission.id(),
            ));
        }
        if notifications.contains_key(&notification.id()) {
            return Err(SubmissionRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        submissions.insert(submission.id(), submission.clone());
        notifications.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SubmissionId) -> SubmissionRepositoryResult<Option<Submission>> {
        let submissions = self.submissions.read().map_err(poisoned)?;
        Ok(submissions.get(&id).cloned())
    }

    async fn list_all(&self) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.collect_sorted(|_| true)
    }

    async fn list_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.collect_sorted(|submission| submission.task_id() == task_id)
    }

    async fn list_by_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.collect_sorted(|submission| {
            submission.task_id() == task_id && submission.user_id() == user_id
        })
    }
}
