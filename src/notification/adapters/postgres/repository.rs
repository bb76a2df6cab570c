//! `PostgreSQL` repository implementation for notifications.

use super::models::NotificationRow;
use crate::directory::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::persistence::{PgPool, run_blocking, schema::notifications};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let notification_id = notification.id();
        let row = notification_to_row(notification);
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::DuplicateNotification(notification_id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let notification_id = notification.id();
        let is_read = notification.is_read();
        run_blocking(&self.pool, move |connection| {
            let target =
                notifications::table.filter(notifications::id.eq(notification_id.into_inner()));
            let affected = diesel::update(target)
                .set(notifications::is_read.eq(is_read))
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if affected == 0 {
                return Err(NotificationRepositoryError::NotFound(notification_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: NotificationId) -> NotificationRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let target = notifications::table.filter(notifications::id.eq(id.into_inner()));
            let affected = diesel::delete(target)
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            if affected == 0 {
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        run_blocking(&self.pool, move |connection| {
            let row = notifications::table
                .filter(notifications::id.eq(id.into_inner()))
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(row.map(row_to_notification))
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        run_blocking(&self.pool, move |connection| {
            let rows = notifications::table
                .filter(notifications::user_id.eq(user_id.into_inner()))
                .order(notifications::created_at.desc())
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_notification).collect())
        })
        .await
    }
}

pub(crate) fn notification_to_row(notification: &Notification) -> NotificationRow {
    NotificationRow {
        id: notification.id().into_inner(),
        user_id: notification.user_id().into_inner(),
        message: notification.message().to_owned(),
        kind: notification.kind().to_owned(),
        is_read: notification.is_read(),
        created_at: notification.created_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> Notification {
    Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        message: row.message,
        kind: row.kind,
        is_read: row.is_read,
        created_at: row.created_at,
    })
}
