//! In-memory notification store.
//!
//! The submission adapter writes into the same table so a submission and
//! its notification land together.

mod notification;

pub use notification::InMemoryNotificationRepository;
pub(crate) use notification::NotificationTable;
