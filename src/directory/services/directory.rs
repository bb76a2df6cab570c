//! Service layer for registering users and teams.

use crate::directory::{
    domain::{DirectoryDomainError, Email, Membership, Role, Team, TeamId, User, UserId},
    ports::{DirectoryRepositoryError, TeamRepository, UserRepository},
};
use crate::error::{Classify, FailureKind};
use crate::lookup::{EntityKind, NotFoundError, ResolveError, resolve};
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    role: Role,
}

impl RegisterUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Directory repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
}

impl<E> From<ResolveError<E>> for DirectoryServiceError
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

impl Classify for DirectoryServiceError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) => FailureKind::Validation,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Repository(
                DirectoryRepositoryError::DuplicateEmail(_)
                | DirectoryRepositoryError::DuplicateUser(_)
                | DirectoryRepositoryError::DuplicateTeam(_),
            ) => FailureKind::Conflict,
            Self::Repository(DirectoryRepositoryError::Persistence(_)) | Self::Project(_) => {
                FailureKind::Storage
            }
        }
    }
}

/// Result type for directory service operations.
pub type DirectoryServiceResult<T> = Result<T, DirectoryServiceError>;

/// User and team registration service.
#[derive(Clone)]
pub struct DirectoryService<U, T, P, C>
where
    U: UserRepository,
    T: TeamRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    teams: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<U, T, P, C> DirectoryService<U, T, P, C>
where
    U: UserRepository,
    T: TeamRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub const fn new(users: Arc<U>, teams: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            users,
            teams,
            projects,
            clock,
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Domain`] for a blank name or a
    /// malformed email, or [`DirectoryServiceError::Repository`] when the
    /// email is already registered.
    pub async fn register_user(&self, request: RegisterUserRequest) -> DirectoryServiceResult<User> {
        let email = Email::new(request.email)?;
        let user = User::new(request.name, email, request.role, &*self.clock)?;
        self.users.store(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    /// Creates a team attached to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::NotFound`] when the project does not
    /// exist, or domain and persistence errors.
    pub async fn create_team(
        &self,
        name: impl Into<String>,
        project_id: ProjectId,
    ) -> DirectoryServiceResult<Team> {
        let team_name = name.into();
        let project = resolve(
            EntityKind::Project,
            project_id,
            self.projects.find_by_id(project_id),
        )
        .await?;
        let team = Team::new(team_name, project.id(), &*self.clock)?;
        self.teams.store(&team).await?;
        info!(team_id = %team.id(), project_id = %project.id(), "team created");
        Ok(team)
    }

    /// Adds a user to a team. Adding an existing member succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::NotFound`] when the team or user does
    /// not exist.
    pub async fn add_member(&self, team_id: TeamId, user_id: UserId) -> DirectoryServiceResult<()> {
        let team = resolve(EntityKind::Team, team_id, self.teams.find_by_id(team_id)).await?;
        let user = resolve(EntityKind::User, user_id, self.users.find_by_id(user_id)).await?;
        self.teams
            .add_member(Membership::new(user.id(), team.id()))
            .await?;
        info!(team_id = %team.id(), user_id = %user.id(), "team member added");
        Ok(())
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::NotFound`] when the user does not
    /// exist.
    pub async fn find_user(&self, user_id: UserId) -> DirectoryServiceResult<User> {
        Ok(resolve(EntityKind::User, user_id, self.users.find_by_id(user_id)).await?)
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Domain`] for a malformed email or
    /// [`DirectoryServiceError::NotFound`] when nobody is registered under it.
    pub async fn find_user_by_email(&self, email: &str) -> DirectoryServiceResult<User> {
        let normalized = Email::new(email)?;
        Ok(resolve(
            EntityKind::User,
            &normalized,
            self.users.find_by_email(&normalized),
        )
        .await?)
    }
}
