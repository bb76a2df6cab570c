//! Port contracts for the directory.

pub mod repository;

pub use repository::{
    DirectoryRepositoryError, DirectoryRepositoryResult, TeamRepository, UserRepository,
};
