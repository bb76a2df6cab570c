//! Submissions made against tasks.
//!
//! Every submission raises an `ENTREGA` notification for the submitting
//! user. Both records are committed together through
//! [`ports::SubmissionRepository::store_with_notification`], so a failed
//! write leaves neither behind.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
