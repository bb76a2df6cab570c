//! Diesel row models for users, teams, and memberships.

use crate::persistence::schema::{teams, user_teams, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Query result and insert row for team records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub project_id: uuid::Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert model for membership records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = user_teams)]
pub struct MembershipRow {
    pub user_id: uuid::Uuid,
    pub team_id: uuid::Uuid,
}
