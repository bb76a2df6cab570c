//! Service layer for project creation, editing, and status transitions.

use crate::directory::{
    domain::UserId,
    ports::{DirectoryRepositoryError, UserRepository},
};
use crate::error::{Classify, FailureKind};
use crate::lookup::{EntityKind, NotFoundError, ResolveError, resolve};
use crate::project::{
    domain::{
        NewProject, ParseProjectStatusError, Project, ProjectDomainError, ProjectId,
        ProjectPatch, ProjectStatus,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    created_by: UserId,
    status: Option<ProjectStatus>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name and creator.
    #[must_use]
    pub fn new(name: impl Into<String>, created_by: UserId) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            created_by,
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Records a client-supplied status. It is ignored on creation.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for editing a project's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    patch: ProjectPatch,
    status: Option<ProjectStatus>,
}

impl UpdateProjectRequest {
    /// Creates an update request from a field patch.
    #[must_use]
    pub const fn new(patch: ProjectPatch) -> Self {
        Self {
            patch,
            status: None,
        }
    }

    /// Records a client-supplied status. It is ignored by field updates.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for a status transition named by string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionProjectRequest {
    project_id: ProjectId,
    target_status: String,
}

impl TransitionProjectRequest {
    /// Creates a transition request.
    #[must_use]
    pub fn new(project_id: ProjectId, target_status: impl Into<String>) -> Self {
        Self {
            project_id,
            target_status: target_status.into(),
        }
    }
}

/// Service-level errors for project lifecycle operations.
#[derive(Debug, Error)]
pub enum ProjectLifecycleError {
    /// Domain validation failed or the transition was rejected.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The requested status name is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseProjectStatusError),
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

impl<E> From<ResolveError<E>> for ProjectLifecycleError
where
    E: Into<Self>,
{
    fn from(err: ResolveError<E>) -> Self {
        match err {
            ResolveError::NotFound(missing) => Self::NotFound(missing),
            ResolveError::Lookup(inner) => inner.into(),
        }
    }
}

impl Classify for ProjectLifecycleError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Domain(err) if err.is_transition_rejection() => FailureKind::InvalidTransition,
            Self::Domain(_) | Self::InvalidStatus(_) => FailureKind::Validation,
            Self::NotFound(_) | Self::Repository(ProjectRepositoryError::NotFound(_)) => {
                FailureKind::NotFound
            }
            Self::Repository(ProjectRepositoryError::DuplicateProject(_)) => FailureKind::Conflict,
            Self::Repository(ProjectRepositoryError::Persistence(_)) | Self::Directory(_) => {
                FailureKind::Storage
            }
        }
    }
}

/// Result type for project lifecycle operations.
pub type ProjectLifecycleResult<T> = Result<T, ProjectLifecycleError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectLifecycleService<P, U, C>
where
    P: ProjectRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<P, U, C> ProjectLifecycleService<P, U, C>
where
    P: ProjectRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project lifecycle service.
    #[must_use]
    pub const fn new(projects: Arc<P>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            projects,
            users,
            clock,
        }
    }

    /// Creates a project in `IN_PROGRESS`, whatever status the request names.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] when the name is blank, a
    /// date is missing, or the end date precedes the start date, and
    /// [`ProjectLifecycleError::NotFound`] when the creator does not exist.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectLifecycleResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            start_date,
            end_date,
            created_by,
            status,
        } = request;

        if let Some(requested) = status {
            debug!(%requested, "ignoring status supplied at project creation");
        }

        let mut input = NewProject::new(name);
        if let Some(text) = description {
            input = input.with_description(text);
        }
        if let Some(start) = start_date {
            input = input.with_start_date(start);
        }
        if let Some(end) = end_date {
            input = input.with_end_date(end);
        }
        let project = Project::create(input, created_by, &*self.clock)?;

        resolve(EntityKind::User, created_by, self.users.find_by_id(created_by)).await?;
        self.projects.store(&project).await?;
        info!(project_id = %project.id(), created_by = %created_by, "project created");
        Ok(project)
    }

    /// Applies a field patch. The project's status is preserved even when
    /// the request carries a different one.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] when the project does not
    /// exist and [`ProjectLifecycleError::Domain`] when the patched fields
    /// are invalid.
    pub async fn update(
        &self,
        project_id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectLifecycleResult<Project> {
        let UpdateProjectRequest { patch, status } = request;
        let mut project = self.find_by_id(project_id).await?;

        if let Some(requested) = status.filter(|requested| *requested != project.status()) {
            debug!(
                project_id = %project_id,
                current = %project.status(),
                %requested,
                "ignoring status carried by field update"
            );
        }

        project.apply_patch(patch, &*self.clock)?;
        self.projects.update(&project).await?;
        info!(project_id = %project_id, "project updated");
        Ok(project)
    }

    /// Moves a project to a new status according to the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] when the project does not
    /// exist and [`ProjectLifecycleError::Domain`] with
    /// [`ProjectDomainError::InvalidStatusTransition`] when the move is not
    /// allowed.
    pub async fn change_status(
        &self,
        project_id: ProjectId,
        target: ProjectStatus,
    ) -> ProjectLifecycleResult<Project> {
        let mut project = self.find_by_id(project_id).await?;
        if let Err(err) = project.transition_to(target, &*self.clock) {
            warn!(
                project_id = %project_id,
                from = %project.status(),
                to = %target,
                "project status transition rejected"
            );
            return Err(err.into());
        }
        self.projects.update(&project).await?;
        info!(project_id = %project_id, status = %target, "project status changed");
        Ok(project)
    }

    /// Parses the target status and applies [`Self::change_status`].
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::InvalidStatus`] when the status name
    /// is unknown, otherwise the errors of [`Self::change_status`].
    pub async fn transition(
        &self,
        request: TransitionProjectRequest,
    ) -> ProjectLifecycleResult<Project> {
        let target = ProjectStatus::try_from(request.target_status.as_str())?;
        self.change_status(request.project_id, target).await
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] when the project does not
    /// exist.
    pub async fn find_by_id(&self, project_id: ProjectId) -> ProjectLifecycleResult<Project> {
        Ok(resolve(
            EntityKind::Project,
            project_id,
            self.projects.find_by_id(project_id),
        )
        .await?)
    }

    /// Returns every project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> ProjectLifecycleResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }
}
