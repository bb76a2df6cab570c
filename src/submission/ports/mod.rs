//! Port contracts for submissions.

pub mod repository;

pub use repository::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult};
