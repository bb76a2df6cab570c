//! Port contracts for feedback.

pub mod repository;

pub use repository::{FeedbackRepository, FeedbackRepositoryError, FeedbackRepositoryResult};
