//! Diesel row models for submission persistence.

use crate::persistence::schema::submissions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for submission records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubmissionRow {
    pub id: uuid::Uuid,
    pub content: String,
    pub file_ref: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub task_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
}
