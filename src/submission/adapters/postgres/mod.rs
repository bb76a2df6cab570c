//! `PostgreSQL` adapters for submission persistence.

mod models;
mod repository;

pub use repository::PostgresSubmissionRepository;
