//! In-memory feedback and response store.

mod feedback;

pub use feedback::InMemoryFeedbackRepository;
