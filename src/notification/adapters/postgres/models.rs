//! Diesel row models for notification persistence.

use crate::persistence::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for notification records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
