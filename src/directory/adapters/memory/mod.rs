//! In-memory directory repositories for tests and embedding.

mod team;
mod user;

pub use team::InMemoryTeamRepository;
pub use user::InMemoryUserRepository;

use crate::directory::ports::DirectoryRepositoryError;

fn poisoned(err: impl ToString) -> DirectoryRepositoryError {
    DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}
