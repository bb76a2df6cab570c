//! Failure classification shared by every service error.
//!
//! The outer HTTP layer translates service failures into responses. It only
//! needs to know which class a failure belongs to, not the concrete error
//! type of each context.

use serde::{Deserialize, Serialize};

/// Coarse class of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed or missing input, rejected before any mutation.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// An illegal lifecycle move was requested.
    InvalidTransition,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// The backing store failed.
    Storage,
}

/// Errors that can report their [`FailureKind`].
pub trait Classify {
    /// Returns the failure class of this error.
    fn failure_kind(&self) -> FailureKind;
}
