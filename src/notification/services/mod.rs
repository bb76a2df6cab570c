//! Application services for notifications.

mod sink;

pub use sink::{NotificationSinkError, NotificationSinkResult, NotificationSinkService};
