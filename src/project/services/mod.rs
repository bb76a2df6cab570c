//! Application services for project lifecycle orchestration.

mod lifecycle;
mod query;

pub use lifecycle::{
    CreateProjectRequest, ProjectLifecycleError, ProjectLifecycleResult, ProjectLifecycleService,
    TransitionProjectRequest, UpdateProjectRequest,
};
pub use query::{ProjectQueryError, ProjectQueryService};
