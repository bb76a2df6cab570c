//! In-memory project adapter.

mod project;

pub use project::InMemoryProjectRepository;
