//! In-memory project repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::UserId;
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted(
        &self,
        predicate: impl Fn(&Project) -> bool,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.state.read().map_err(poisoned)?;
        let mut matching: Vec<Project> = projects
            .values()
            .filter(|project| predicate(project))
            .cloned()
            .collect();
        matching.sort_by_key(Project::created_at);
        Ok(matching)
    }
}

fn poisoned(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.state.write().map_err(poisoned)?;
        if projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.state.write().map_err(poisoned)?;
        let slot = projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.state.read().map_err(poisoned)?;
        Ok(projects.get(&id).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.collect_sorted(|_| true)
    }

    async fn list_by_creator(&self, user_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.collect_sorted(|project| project.created_by() == user_id)
    }

    async fn list_by_ids(&self, ids: &[ProjectId]) -> ProjectRepositoryResult<Vec<Project>> {
        self.collect_sorted(|project| ids.contains(&project.id()))
    }
}
