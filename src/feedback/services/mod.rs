//! Application services for feedback threads.

mod thread;

pub use thread::{FeedbackService, FeedbackServiceError, FeedbackServiceResult};
