//! Teams and team membership.

use super::{DirectoryDomainError, TeamId, UserId};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A team working on exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    project_id: ProjectId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted identifier.
    pub id: TeamId,
    /// Persisted team name.
    pub name: String,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team for a project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyTeamName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        project_id: ProjectId,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyTeamName);
        }
        Ok(Self {
            id: TeamId::new(),
            name: trimmed.to_owned(),
            project_id,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            project_id: data.project_id,
            created_at: data.created_at,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Membership of a user in a team. The pair is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    /// Member user.
    pub user_id: UserId,
    /// Team joined.
    pub team_id: TeamId,
}

impl Membership {
    /// Creates a membership pair.
    #[must_use]
    pub const fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self { user_id, team_id }
    }
}
