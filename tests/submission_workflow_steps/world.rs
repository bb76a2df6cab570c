//! Shared world state for submission workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use coursework::{
    directory::{adapters::memory::InMemoryUserRepository, domain::User},
    notification::{
        adapters::memory::InMemoryNotificationRepository, services::NotificationSinkService,
    },
    project::adapters::memory::InMemoryProjectRepository,
    submission::{
        adapters::memory::InMemorySubmissionRepository, services::SubmissionWorkflowService,
    },
    task::{adapters::memory::InMemoryTaskRepository, domain::Task},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Submission service type used by the BDD world.
pub type TestSubmissionService = SubmissionWorkflowService<
    InMemorySubmissionRepository,
    InMemoryTaskRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

/// Notification service type used by the BDD world.
pub type TestNotificationService =
    NotificationSinkService<InMemoryNotificationRepository, InMemoryUserRepository, DefaultClock>;

/// Scenario world for submission behaviour tests.
pub struct SubmissionWorld {
    pub submissions: TestSubmissionService,
    pub notifications: TestNotificationService,
    pub users: Arc<InMemoryUserRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub registered: HashMap<String, User>,
    pub task: Option<Task>,
}

impl SubmissionWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let notification_repo = Arc::new(InMemoryNotificationRepository::new());
        let submission_repo = Arc::new(InMemorySubmissionRepository::new(&notification_repo));

        Self {
            submissions: SubmissionWorkflowService::new(
                submission_repo,
                Arc::clone(&tasks),
                Arc::clone(&users),
                Arc::clone(&clock),
            ),
            notifications: NotificationSinkService::new(
                notification_repo,
                Arc::clone(&users),
                clock,
            ),
            users,
            projects,
            tasks,
            registered: HashMap::new(),
            task: None,
        }
    }

    /// Looks up a user registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no user with `email` was registered.
    pub fn user(&self, email: &str) -> Result<&User, eyre::Report> {
        self.registered
            .get(email)
            .ok_or_else(|| eyre::eyre!("user {email} not registered in scenario"))
    }
}

impl Default for SubmissionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SubmissionWorld {
    SubmissionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
