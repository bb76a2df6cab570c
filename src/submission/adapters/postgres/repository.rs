//! `PostgreSQL` repository implementation for submissions.

use super::models::SubmissionRow;
use crate::directory::domain::UserId;
use crate::notification::{adapters::postgres::notification_to_row, domain::Notification};
use crate::persistence::{
    PgPool, run_blocking,
    schema::{notifications, submissions},
};
use crate::submission::{
    domain::{PersistedSubmissionData, Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

type BoxedSubmissionQuery = submissions::BoxedQuery<'static, diesel::pg::Pg>;

impl From<DieselError> for SubmissionRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed submission repository.
///
/// The submission and its notification are inserted in one transaction.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_where<F>(&self, filter: F) -> SubmissionRepositoryResult<Vec<Submission>>
    where
        F: FnOnce(BoxedSubmissionQuery) -> BoxedSubmissionQuery + Send + 'static,
    {
        run_blocking(&self.pool, move |connection| {
            let rows = filter(submissions::table.into_boxed())
                .order(submissions::submitted_at.asc())
                .select(SubmissionRow::as_select())
                .load::<SubmissionRow>(connection)?;
            Ok(rows.into_iter().map(row_to_submission).collect())
        })
        .await
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn store_with_notification(
        &self,
        submission: &Submission,
        notification: &Notification,
    ) -> SubmissionRepositoryResult<()> {
        let submission_id = submission.id();
        let notification_id = notification.id();
        let submission_row = SubmissionRow {
            id: submission_id.into_inner(),
            content: submission.content().to_owned(),
            file_ref: submission.file_ref().map(ToOwned::to_owned),
            submitted_at: submission.submitted_at(),
            task_id: submission.task_id().into_inner(),
            user_id: submission.user_id().into_inner(),
        };
        let notification_row = notification_to_row(notification);

        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, SubmissionRepositoryError, _>(|tx| {
                diesel::insert_into(submissions::table)
                    .values(&submission_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            SubmissionRepositoryError::DuplicateSubmission(submission_id)
                        }
                        _ => SubmissionRepositoryError::persistence(err),
                    })?;
                diesel::insert_into(notifications::table)
                    .values(&notification_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            SubmissionRepositoryError::DuplicateNotification(notification_id)
                        }
                        _ => SubmissionRepositoryError::persistence(err),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: SubmissionId) -> SubmissionRepositoryResult<Option<Submission>> {
        run_blocking(&self.pool, move |connection| {
            let row = submissions::table
                .filter(submissions::id.eq(id.into_inner()))
                .select(SubmissionRow::as_select())
                .first::<SubmissionRow>(connection)
                .optional()?;
            Ok(row.map(row_to_submission))
        })
        .await
    }

    async fn list_all(&self) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.load_where(|query| query).await
    }

    async fn list_by_task(&self, task_id: TaskId) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.load_where(move |query| query.filter(submissions::task_id.eq(task_id.into_inner())))
            .await
    }

    async fn list_by_task_and_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> SubmissionRepositoryResult<Vec<Submission>> {
        self.load_where(move |query| {
            query
                .filter(submissions::task_id.eq(task_id.into_inner()))
                .filter(submissions::user_id.eq(user_id.into_inner()))
        })
        .await
    }
}

fn row_to_submission(row: SubmissionRow) -> Submission {
    Submission::from_persisted(PersistedSubmissionData {
        id: SubmissionId::from_uuid(row.id),
        content: row.content,
        file_ref: row.file_ref,
        submitted_at: row.submitted_at,
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
    })
}
