//! `PostgreSQL` repository implementation for feedback threads.

use super::models::{FeedbackResponseRow, FeedbackRow};
use crate::feedback::{
    domain::{
        Feedback, FeedbackId, FeedbackResponse, FeedbackResponseId, PersistedFeedbackData,
        PersistedFeedbackResponseData,
    },
    ports::{FeedbackRepository, FeedbackRepositoryError, FeedbackRepositoryResult},
};
use crate::persistence::{
    PgPool, run_blocking,
    schema::{feedback, feedback_responses},
};
use crate::submission::domain::SubmissionId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

impl From<DieselError> for FeedbackRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed feedback repository.
#[derive(Debug, Clone)]
pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn store_feedback(&self, entry: &Feedback) -> FeedbackRepositoryResult<()> {
        let feedback_id = entry.id();
        let row = FeedbackRow {
            id: feedback_id.into_inner(),
            submission_id: entry.submission_id().into_inner(),
            content: entry.content().to_owned(),
            created_at: entry.created_at(),
            updated_at: entry.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(feedback::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FeedbackRepositoryError::DuplicateFeedback(feedback_id)
                    }
                    _ => FeedbackRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_feedback(&self, entry: &Feedback) -> FeedbackRepositoryResult<()> {
        let feedback_id = entry.id();
        let content = entry.content().to_owned();
        let updated_at = entry.updated_at();
        run_blocking(&self.pool, move |connection| {
            let target = feedback::table.filter(feedback::id.eq(feedback_id.into_inner()));
            let affected = diesel::update(target)
                .set((
                    feedback::content.eq(content),
                    feedback::updated_at.eq(updated_at),
                ))
                .execute(connection)?;
            if affected == 0 {
                return Err(FeedbackRepositoryError::FeedbackNotFound(feedback_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_feedback(&self, id: FeedbackId) -> FeedbackRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            connection.transaction::<_, FeedbackRepositoryError, _>(|tx| {
                diesel::delete(
                    feedback_responses::table
                        .filter(feedback_responses::feedback_id.eq(id.into_inner())),
                )
                .execute(tx)?;
                let affected =
                    diesel::delete(feedback::table.filter(feedback::id.eq(id.into_inner())))
                        .execute(tx)?;
                if affected == 0 {
                    return Err(FeedbackRepositoryError::FeedbackNotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_feedback(&self, id: FeedbackId) -> FeedbackRepositoryResult<Option<Feedback>> {
        run_blocking(&self.pool, move |connection| {
            let row = feedback::table
                .filter(feedback::id.eq(id.into_inner()))
                .select(FeedbackRow::as_select())
                .first::<FeedbackRow>(connection)
                .optional()?;
            Ok(row.map(row_to_feedback))
        })
        .await
    }

    async fn list_feedback(&self) -> FeedbackRepositoryResult<Vec<Feedback>> {
        run_blocking(&self.pool, move |connection| {
            let rows = feedback::table
                .order(feedback::created_at.asc())
                .select(FeedbackRow::as_select())
                .load::<FeedbackRow>(connection)?;
            Ok(rows.into_iter().map(row_to_feedback).collect())
        })
        .await
    }

    async fn list_feedback_for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> FeedbackRepositoryResult<Vec<Feedback>> {
        run_blocking(&self.pool, move |connection| {
            let rows = feedback::table
                .filter(feedback::submission_id.eq(submission_id.into_inner()))
                .order(feedback::created_at.asc())
                .select(FeedbackRow::as_select())
                .load::<FeedbackRow>(connection)?;
            Ok(rows.into_iter().map(row_to_feedback).collect())
        })
        .await
    }

    async fn store_response(&self, response: &FeedbackResponse) -> FeedbackRepositoryResult<()> {
        let response_id = response.id();
        let row = FeedbackResponseRow {
            id: response_id.into_inner(),
            feedback_id: response.feedback_id().into_inner(),
            content: response.content().to_owned(),
            created_at: response.created_at(),
            updated_at: response.updated_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(feedback_responses::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FeedbackRepositoryError::DuplicateResponse(response_id)
                    }
                    _ => FeedbackRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_response(&self, response: &FeedbackResponse) -> FeedbackRepositoryResult<()> {
        let response_id = response.id();
        let content = response.content().to_owned();
        let updated_at = response.updated_at();
        run_blocking(&self.pool, move |connection| {
            let target = feedback_responses::table
                .filter(feedback_responses::id.eq(response_id.into_inner()));
            let affected = diesel::update(target)
                .set((
                    feedback_responses::content.eq(content),
                    feedback_responses::updated_at.eq(updated_at),
                ))
                .execute(connection)?;
            if affected == 0 {
                return Err(FeedbackRepositoryError::ResponseNotFound(response_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_response(&self, id: FeedbackResponseId) -> FeedbackRepositoryResult<()> {
        run_blocking(&self.pool, move |connection| {
            let target =
                feedback_responses::table.filter(feedback_responses::id.eq(id.into_inner()));
            let affected = diesel::delete(target).execute(connection)?;
            if affected == 0 {
                return Err(FeedbackRepositoryError::ResponseNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_response(
        &self,
        id: FeedbackResponseId,
    ) -> FeedbackRepositoryResult<Option<FeedbackResponse>> {
        run_blocking(&self.pool, move |connection| {
            let row = feedback_responses::table
                .filter(feedback_responses::id.eq(id.into_inner()))
                .select(FeedbackResponseRow::as_select())
                .first::<FeedbackResponseRow>(connection)
                .optional()?;
            Ok(row.map(row_to_response))
        })
        .await
    }

    async fn list_responses(&self) -> FeedbackRepositoryResult<Vec<FeedbackResponse>> {
        run_blocking(&self.pool, move |connection| {
            let rows = feedback_responses::table
                .order(feedback_responses::created_at.asc())
                .select(FeedbackResponseRow::as_select())
                .load::<FeedbackResponseRow>(connection)?;
            Ok(rows.into_iter().map(row_to_response).collect())
        })
        .await
    }
}

fn row_to_feedback(row: FeedbackRow) -> Feedback {
    Feedback::from_persisted(PersistedFeedbackData {
        id: FeedbackId::from_uuid(row.id),
        submission_id: SubmissionId::from_uuid(row.submission_id),
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_response(row: FeedbackResponseRow) -> FeedbackResponse {
    FeedbackResponse::from_persisted(PersistedFeedbackResponseData {
        id: FeedbackResponseId::from_uuid(row.id),
        feedback_id: FeedbackId::from_uuid(row.feedback_id),
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
