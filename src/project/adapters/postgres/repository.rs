//! `PostgreSQL` repository implementation for projects.

use super::models::{NewProjectRow, ProjectChangeset, ProjectRow};
use crate::directory::domain::UserId;
use crate::persistence::{PgPool, run_blocking, schema::projects};
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

type BoxedProjectQuery = projects::BoxedQuery<'static, diesel::pg::Pg>;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_where<F>(&self, filter: F) -> ProjectRepositoryResult<Vec<Project>>
    where
        F: FnOnce(BoxedProjectQuery) -> BoxedProjectQuery + Send + 'static,
    {
        run_blocking(&self.pool, move |connection| {
            let rows = filter(projects::table.into_boxed())
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = NewProjectRow {
            id: project_id.into_inner(),
            name: project.name().to_owned(),
            description: project.description().map(ToOwned::to_owned),
            start_date: project.start_date(),
            end_date: project.end_date(),
            status: project.status().as_str().to_owned(),
            created_by: project.created_by().into_inner(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let changes = ProjectChangeset {
            name: project.name().to_owned(),
            description: project.description().map(ToOwned::to_owned),
            start_date: project.start_date(),
            end_date: project.end_date(),
            status: project.status().as_str().to_owned(),
            updated_at: project.updated_at(),
        };

        run_blocking(&self.pool, move |connection| {
            let target = projects::table.filter(projects::id.eq(project_id.into_inner()));
            let affected = diesel::update(target)
                .set(&changes)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if affected == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        run_blocking(&self.pool, move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.load_where(|query| query).await
    }

    async fn list_by_creator(&self, user_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.load_where(move |query| query.filter(projects::created_by.eq(user_id.into_inner())))
            .await
    }

    async fn list_by_ids(&self, ids: &[ProjectId]) -> ProjectRepositoryResult<Vec<Project>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.load_where(move |query| query.filter(projects::id.eq_any(uuids)))
            .await
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        start_date,
        end_date,
        status: persisted_status,
        created_by,
        created_at,
        updated_at,
    } = row;
    let status = ProjectStatus::try_from(persisted_status.as_str())
        .map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name,
        description,
        start_date,
        end_date,
        status,
        created_by: UserId::from_uuid(created_by),
        created_at,
        updated_at,
    }))
}
