//! Domain model for submissions.

mod access;
mod ids;
mod submission;

pub use access::AdministrativeAccess;
pub use ids::SubmissionId;
pub use submission::{NewSubmission, PersistedSubmissionData, Submission};
