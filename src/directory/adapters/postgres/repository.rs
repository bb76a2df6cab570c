//! `PostgreSQL` repository implementations for the directory.

use super::models::{MembershipRow, NewUserRow, TeamRow, UserRow};
use crate::directory::{
    domain::{
        Email, Membership, PersistedTeamData, PersistedUserData, Role, Team, TeamId, User, UserId,
    },
    ports::{DirectoryRepositoryError, DirectoryRepositoryResult, TeamRepository, UserRepository},
};
use crate::persistence::{
    PgPool, run_blocking,
    schema::{teams, user_teams, users},
};
use crate::project::domain::ProjectId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = NewUserRow {
            id: user_id.into_inner(),
            name: user.name().to_owned(),
            email: email.as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("idx_users_email_unique") =>
                    {
                        DirectoryRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateUser(user_id)
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> DirectoryRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

/// `PostgreSQL`-backed team repository.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a repository from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn store(&self, team: &Team) -> DirectoryRepositoryResult<()> {
        let team_id = team.id();
        let row = TeamRow {
            id: team_id.into_inner(),
            name: team.name().to_owned(),
            project_id: team.project_id().into_inner(),
            created_at: team.created_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(teams::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateTeam(team_id)
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TeamId) -> DirectoryRepositoryResult<Option<Team>> {
        run_blocking(&self.pool, move |connection| {
            let row = teams::table
                .filter(teams::id.eq(id.into_inner()))
                .select(TeamRow::as_select())
                .first::<TeamRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(row.map(row_to_team))
        })
        .await
    }

    async fn add_member(&self, membership: Membership) -> DirectoryRepositoryResult<()> {
        let row = MembershipRow {
            user_id: membership.user_id.into_inner(),
            team_id: membership.team_id.into_inner(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(user_teams::table)
                .values(&row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_member(&self, user_id: UserId) -> DirectoryRepositoryResult<Vec<Team>> {
        run_blocking(&self.pool, move |connection| {
            let rows = user_teams::table
                .inner_join(teams::table)
                .filter(user_teams::user_id.eq(user_id.into_inner()))
                .order(teams::created_at.asc())
                .select(TeamRow::as_select())
                .load::<TeamRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_team).collect())
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> DirectoryRepositoryResult<User> {
    let UserRow {
        id,
        name,
        email: persisted_email,
        role: persisted_role,
        created_at,
    } = row;
    let email = Email::new(persisted_email).map_err(DirectoryRepositoryError::persistence)?;
    let role = Role::try_from(persisted_role.as_str()).map_err(DirectoryRepositoryError::persistence)?;
    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(id),
        name,
        email,
        role,
        created_at,
    }))
}

fn row_to_team(row: TeamRow) -> Team {
    Team::from_persisted(PersistedTeamData {
        id: TeamId::from_uuid(row.id),
        name: row.name,
        project_id: ProjectId::from_uuid(row.project_id),
        created_at: row.created_at,
    })
}
