//! Notifications addressed to users.
//!
//! Notifications are created unread, flip to read at most once, and are
//! hard-deleted on request. Submissions raise one notification each through
//! [`domain::Notification::submission_received`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
