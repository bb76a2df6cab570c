//! In-memory submission adapter for testing.

mod submission;

pub use submission::InMemorySubmissionRepository;
