//! Diesel row models for feedback and responses.

use crate::persistence::schema::{feedback, feedback_responses};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for feedback records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackRow {
    pub id: uuid::Uuid,
    pub submission_id: uuid::Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for response records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = feedback_responses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackResponseRow {
    pub id: uuid::Uuid,
    pub feedback_id: uuid::Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
