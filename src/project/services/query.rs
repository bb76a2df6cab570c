//! Projects visible to a user.

use crate::directory::{
    domain::UserId,
    ports::{DirectoryRepositoryError, TeamRepository},
};
use crate::error::{Classify, FailureKind};
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while aggregating visible projects.
#[derive(Debug, Error)]
pub enum ProjectQueryError {
    /// Project lookup failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Team lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

impl Classify for ProjectQueryError {
    fn failure_kind(&self) -> FailureKind {
        FailureKind::Storage
    }
}

/// Read-side service answering which projects a user can see.
#[derive(Clone)]
pub struct ProjectQueryService<P, T>
where
    P: ProjectRepository,
    T: TeamRepository,
{
    projects: Arc<P>,
    teams: Arc<T>,
}

impl<P, T> ProjectQueryService<P, T>
where
    P: ProjectRepository,
    T: TeamRepository,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(projects: Arc<P>, teams: Arc<T>) -> Self {
        Self { projects, teams }
    }

    /// Returns the projects the user created together with the projects of
    /// every team the user belongs to. Each project appears once; projects
    /// the user created come first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectQueryError`] when a lookup fails.
    pub async fn projects_for_user(&self, user_id: UserId) -> Result<Vec<Project>, ProjectQueryError> {
        let created = self.projects.list_by_creator(user_id).await?;
        let teams = self.teams.list_for_member(user_id).await?;
        let team_project_ids: Vec<ProjectId> = teams.iter().map(|team| team.project_id()).collect();
        let joined = if team_project_ids.is_empty() {
            Vec::new()
        } else {
            self.projects.list_by_ids(&team_project_ids).await?
        };

        let mut seen = HashSet::new();
        Ok(created
            .into_iter()
            .chain(joined)
            .filter(|project| seen.insert(project.id()))
            .collect())
    }
}
