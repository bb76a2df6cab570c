//! Domain model for projects and their status lifecycle.

mod error;
mod ids;
mod project;
mod status;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use project::{NewProject, PersistedProjectData, Project, ProjectPatch};
pub use status::{ALLOWED_TRANSITIONS, ProjectStatus};
