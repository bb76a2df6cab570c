//! Domain model for notifications.

mod error;
mod ids;
mod notification;

pub use error::NotificationDomainError;
pub use ids::NotificationId;
pub use notification::{
    Notification, PersistedNotificationData, SUBMISSION_RECEIVED_KIND,
    SUBMISSION_RECEIVED_MESSAGE,
};
