//! `PostgreSQL` adapters for feedback persistence.

mod models;
mod repository;

pub use repository::PostgresFeedbackRepository;
