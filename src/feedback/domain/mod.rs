//! Domain model for feedback threads.

mod error;
mod feedback;
mod ids;

pub use error::FeedbackDomainError;
pub use feedback::{
    Feedback, FeedbackResponse, PersistedFeedbackData, PersistedFeedbackResponseData,
};
pub use ids::{FeedbackId, FeedbackResponseId};
