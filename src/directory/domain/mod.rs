//! Domain model for users, roles, and teams.

mod error;
mod ids;
mod team;
mod user;

pub use error::{DirectoryDomainError, ParseRoleError};
pub use ids::{TeamId, UserId};
pub use team::{Membership, PersistedTeamData, Team};
pub use user::{Email, PersistedUserData, Role, User};
