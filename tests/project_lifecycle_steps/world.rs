//! Shared world state for project lifecycle BDD scenarios.

use std::sync::Arc;

use coursework::{
    directory::{adapters::memory::InMemoryUserRepository, domain::User},
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::Project,
        services::{ProjectLifecycleError, ProjectLifecycleService},
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestProjectService =
    ProjectLifecycleService<InMemoryProjectRepository, InMemoryUserRepository, DefaultClock>;

/// Scenario world for project lifecycle behaviour tests.
pub struct ProjectLifecycleWorld {
    pub service: TestProjectService,
    pub users: Arc<InMemoryUserRepository>,
    pub teacher: Option<User>,
    pub project: Option<Project>,
    pub last_transition_result: Option<Result<Project, ProjectLifecycleError>>,
}

impl ProjectLifecycleWorld {
    /// Creates a world with no registered users.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = ProjectLifecycleService::new(
            Arc::new(InMemoryProjectRepository::new()),
            Arc::clone(&users),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            users,
            teacher: None,
            project: None,
            last_transition_result: None,
        }
    }
}

impl Default for ProjectLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectLifecycleWorld {
    ProjectLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
