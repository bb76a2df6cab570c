//! `PostgreSQL` adapters for the directory.

mod models;
mod repository;

pub use repository::{PostgresTeamRepository, PostgresUserRepository};
