//! Repository ports for users, teams, and memberships.

use crate::directory::domain::{Email, Membership, Team, TeamId, User, UserId};
use crate::persistence::FromPersistence;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateUser`] when the ID exists
    /// or [`DirectoryRepositoryError::DuplicateEmail`] when the email is taken.
    async fn store(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>>;

    /// Finds a user by normalized email.
    async fn find_by_email(&self, email: &Email) -> DirectoryRepositoryResult<Option<User>>;
}

/// Team and membership persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateTeam`] when the ID exists.
    async fn store(&self, team: &Team) -> DirectoryRepositoryResult<()>;

    /// Finds a team by identifier.
    async fn find_by_id(&self, id: TeamId) -> DirectoryRepositoryResult<Option<Team>>;

    /// Records a membership. Recording an existing membership is a no-op.
    async fn add_member(&self, membership: Membership) -> DirectoryRepositoryResult<()>;

    /// Returns every team the user belongs to.
    async fn list_for_member(&self, user_id: UserId) -> DirectoryRepositoryResult<Vec<Team>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same email already exists.
    #[error("duplicate user email: {0}")]
    DuplicateEmail(Email),

    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl FromPersistence for DirectoryRepositoryError {
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}
