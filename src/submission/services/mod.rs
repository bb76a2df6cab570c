//! Application services for submissions.

mod workflow;

pub use workflow::{SubmissionWorkflowError, SubmissionWorkflowResult, SubmissionWorkflowService};
