//! Shared fixtures for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::TemporaryDatabase;
use chrono::NaiveDate;
use coursework::{
    directory::{
        domain::{Role, User},
        services::RegisterUserRequest,
    },
    persistence::PgPool,
    platform::Platform,
    project::{domain::Project, services::CreateProjectRequest},
};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use rstest::fixture;

/// SQL creating every coursework table.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-01-000000_create_coursework/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "coursework_test_template";

/// A migrated database with every service wired over it.
///
/// Fields drop in order, so the pool releases its connections before the
/// database is dropped.
pub struct PostgresContext {
    /// Services sharing [`Self::pool`].
    pub platform: Platform,
    /// Pool for building repositories directly.
    pub pool: PgPool,
    _temp_db: TemporaryDatabase,
}

impl PostgresContext {
    /// Registers a user with a generated display name.
    pub async fn register(&self, email: &str, role: Role) -> Result<User, BoxError> {
        Ok(self
            .platform
            .directory
            .register_user(RegisterUserRequest::new("Member", email, role))
            .await?)
    }

    /// Creates a spring-term project owned by `owner`.
    pub async fn project(&self, name: &str, owner: &User) -> Result<Project, BoxError> {
        Ok(self
            .platform
            .projects
            .create(
                CreateProjectRequest::new(name, owner.id())
                    .with_start_date(date(2026, 2, 1)?)
                    .with_end_date(date(2026, 6, 30)?),
            )
            .await?)
    }
}

/// Builds a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, BoxError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| BoxError::from(format!("invalid date {year}-{month}-{day}")))
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub async fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    let connection = cluster.connection();
    tokio::task::spawn_blocking(move || {
        cluster.ensure_template_exists(TEMPLATE_DB, |db_name| {
            apply_migrations(&connection.database_url(db_name))
        })
    })
    .await
    .map_err(|err| Box::new(err) as BoxError)?
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_SCHEMA_SQL)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

async fn setup_context(cluster: PostgresCluster) -> Result<PostgresContext, BoxError> {
    let temp_db = tokio::task::spawn_blocking(move || cluster.temporary_database(TEMPLATE_DB))
        .await
        .map_err(|err| Box::new(err) as BoxError)??;

    let manager = ConnectionManager::<PgConnection>::new(temp_db.url());
    let pool: PgPool = Pool::builder()
        .max_size(2)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;

    Ok(PostgresContext {
        platform: Platform::from_pool(&pool),
        pool,
        _temp_db: temp_db,
    })
}

/// Provides a fresh migrated database for each test.
#[fixture]
pub async fn context(
    postgres_cluster: Result<PostgresCluster, BoxError>,
) -> Result<PostgresContext, BoxError> {
    let cluster = postgres_cluster?;
    ensure_template(cluster).await?;
    setup_context(cluster).await
}
