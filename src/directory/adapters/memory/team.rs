//! In-memory teams and memberships.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::directory::{
    domain::{Membership, Team, TeamId, UserId},
    ports::{DirectoryRepositoryError, DirectoryRepositoryResult, TeamRepository},
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    state: Arc<RwLock<InMemoryTeamState>>,
}

#[derive(Debug, Default)]
struct InMemoryTeamState {
    teams: HashMap<TeamId, Team>,
    memberships: HashSet<Membership>,
}

impl InMemoryTeamRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn store(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.teams.contains_key(&team.id()) {
            return Err(DirectoryRepositoryError::DuplicateTeam(team.id()));
        }
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> DirectoryRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn add_member(&self, membership: Membership) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.memberships.insert(membership);
        Ok(())
    }

    async fn list_for_member(&self, user_id: UserId) -> DirectoryRepositoryResult<Vec<Team>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut teams: Vec<Team> = state
            .memberships
            .iter()
            .filter(|membership| membership.user_id == user_id)
            .filter_map(|membership| state.teams.get(&membership.team_id).cloned())
            .collect();
        teams.sort_by_key(Team::created_at);
        Ok(teams)
    }
}
