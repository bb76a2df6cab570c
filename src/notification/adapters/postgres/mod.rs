//! `PostgreSQL` adapters for notification persistence.

pub(crate) mod models;
mod repository;

pub use repository::PostgresNotificationRepository;
pub(crate) use repository::notification_to_row;
