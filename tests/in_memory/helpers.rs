//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use coursework::{
    directory::{
        adapters::memory::{InMemoryTeamRepository, InMemoryUserRepository},
        domain::{Role, User},
        services::{DirectoryService, RegisterUserRequest},
    },
    feedback::{adapters::memory::InMemoryFeedbackRepository, services::FeedbackService},
    notification::{
        adapters::memory::InMemoryNotificationRepository, services::NotificationSinkService,
    },
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::Project,
        services::{CreateProjectRequest, ProjectLifecycleService, ProjectQueryService},
    },
    submission::{
        adapters::memory::InMemorySubmissionRepository, services::SubmissionWorkflowService,
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskCoordinatorService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Every service wired over one set of in-memory repositories.
pub struct Campus {
    pub directory: DirectoryService<
        InMemoryUserRepository,
        InMemoryTeamRepository,
        InMemoryProjectRepository,
        DefaultClock,
    >,
    pub projects:
        ProjectLifecycleService<InMemoryProjectRepository, InMemoryUserRepository, DefaultClock>,
    pub project_queries: ProjectQueryService<InMemoryProjectRepository, InMemoryTeamRepository>,
    pub tasks: TaskCoordinatorService<
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        InMemoryUserRepository,
        InMemoryTeamRepository,
        DefaultClock,
    >,
    pub submissions: SubmissionWorkflowService<
        InMemorySubmissionRepository,
        InMemoryTaskRepository,
        InMemoryUserRepository,
        DefaultClock,
    >,
    pub notifications: NotificationSinkService<
        InMemoryNotificationRepository,
        InMemoryUserRepository,
        DefaultClock,
    >,
    pub feedback:
        FeedbackService<InMemoryFeedbackRepository, InMemorySubmissionRepository, DefaultClock>,
}

impl Campus {
    /// Registers a user with a generated display name.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn register(&self, email: &str, role: Role) -> eyre::Result<User> {
        Ok(self
            .directory
            .register_user(RegisterUserRequest::new("Member", email, role))
            .await?)
    }

    /// Creates a spring-term project owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error when project creation fails.
    pub async fn project(&self, name: &str, owner: &User) -> eyre::Result<Project> {
        Ok(self
            .projects
            .create(
                CreateProjectRequest::new(name, owner.id())
                    .with_start_date(date(2026, 2, 1)?)
                    .with_end_date(date(2026, 6, 30)?),
            )
            .await?)
    }
}

/// Builds a calendar date.
///
/// # Errors
///
/// Returns an error for an impossible date.
pub fn date(year: i32, month: u32, day: u32) -> eyre::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("invalid date {year}-{month}-{day}"))
}

/// Provides a fresh set of services for each test.
#[fixture]
pub fn campus() -> Campus {
    let clock = Arc::new(DefaultClock);
    let users = Arc::new(InMemoryUserRepository::new());
    let teams = Arc::new(InMemoryTeamRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let submissions = Arc::new(InMemorySubmissionRepository::new(&notifications));

    Campus {
        directory: DirectoryService::new(
            Arc::clone(&users),
            Arc::clone(&teams),
            Arc::clone(&projects),
            Arc::clone(&clock),
        ),
        projects: ProjectLifecycleService::new(
            Arc::clone(&projects),
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        project_queries: ProjectQueryService::new(Arc::clone(&projects), Arc::clone(&teams)),
        tasks: TaskCoordinatorService::new(
            Arc::clone(&tasks),
            projects,
            Arc::clone(&users),
            teams,
            Arc::clone(&clock),
        ),
        submissions: SubmissionWorkflowService::new(
            Arc::clone(&submissions),
            tasks,
            Arc::clone(&users),
            Arc::clone(&clock),
        ),
        notifications: NotificationSinkService::new(notifications, users, Arc::clone(&clock)),
        feedback: FeedbackService::new(
            Arc::new(InMemoryFeedbackRepository::new()),
            submissions,
            clock,
        ),
    }
}
