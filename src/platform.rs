//! Wiring of every service over the `PostgreSQL` adapters.
//!
//! A host process loads a [`CourseworkConfig`], calls [`Platform::connect`],
//! and hands the resulting services to its request handlers. All services
//! share one connection pool and one system clock.

use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, CourseworkConfig};
use crate::directory::adapters::postgres::{PostgresTeamRepository, PostgresUserRepository};
use crate::directory::services::DirectoryService;
use crate::feedback::adapters::postgres::PostgresFeedbackRepository;
use crate::feedback::services::FeedbackService;
use crate::notification::adapters::postgres::PostgresNotificationRepository;
use crate::notification::services::NotificationSinkService;
use crate::persistence::{self, PgPool};
use crate::project::adapters::postgres::PostgresProjectRepository;
use crate::project::services::{ProjectLifecycleService, ProjectQueryService};
use crate::submission::adapters::postgres::PostgresSubmissionRepository;
use crate::submission::services::SubmissionWorkflowService;
use crate::task::adapters::postgres::PostgresTaskRepository;
use crate::task::services::TaskCoordinatorService;

/// Directory service backed by `PostgreSQL`.
pub type PgDirectoryService = DirectoryService<
    PostgresUserRepository,
    PostgresTeamRepository,
    PostgresProjectRepository,
    DefaultClock,
>;

/// Project lifecycle service backed by `PostgreSQL`.
pub type PgProjectLifecycleService =
    ProjectLifecycleService<PostgresProjectRepository, PostgresUserRepository, DefaultClock>;

/// Project query service backed by `PostgreSQL`.
pub type PgProjectQueryService =
    ProjectQueryService<PostgresProjectRepository, PostgresTeamRepository>;

/// Task coordinator backed by `PostgreSQL`.
pub type PgTaskCoordinatorService = TaskCoordinatorService<
    PostgresTaskRepository,
    PostgresProjectRepository,
    PostgresUserRepository,
    PostgresTeamRepository,
    DefaultClock,
>;

/// Submission workflow backed by `PostgreSQL`.
pub type PgSubmissionWorkflowService = SubmissionWorkflowService<
    PostgresSubmissionRepository,
    PostgresTaskRepository,
    PostgresUserRepository,
    DefaultClock,
>;

/// Notification sink backed by `PostgreSQL`.
pub type PgNotificationSinkService =
    NotificationSinkService<PostgresNotificationRepository, PostgresUserRepository, DefaultClock>;

/// Feedback service backed by `PostgreSQL`.
pub type PgFeedbackService =
    FeedbackService<PostgresFeedbackRepository, PostgresSubmissionRepository, DefaultClock>;

/// Errors raised while assembling the platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Every service of the platform, sharing one pool.
pub struct Platform {
    /// User and team registration.
    pub directory: PgDirectoryService,
    /// Project creation, editing, and status transitions.
    pub projects: PgProjectLifecycleService,
    /// Read-side project queries.
    pub project_queries: PgProjectQueryService,
    /// Task management.
    pub tasks: PgTaskCoordinatorService,
    /// Submission intake.
    pub submissions: PgSubmissionWorkflowService,
    /// Notification inbox.
    pub notifications: PgNotificationSinkService,
    /// Feedback threads.
    pub feedback: PgFeedbackService,
}

impl Platform {
    /// Validates `config`, opens the pool, and wires every service.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Config`] when the configuration is invalid
    /// and [`PlatformError::Pool`] when the database is unreachable.
    pub fn connect(config: &CourseworkConfig) -> Result<Self, PlatformError> {
        let validated = config.clone().validated()?;
        let pool = persistence::connect(&validated.database)?;
        info!(
            max_connections = validated.database.max_connections,
            "connected coursework pool"
        );
        Ok(Self::from_pool(&pool))
    }

    /// Wires every service over an existing pool.
    #[must_use]
    pub fn from_pool(pool: &PgPool) -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(PostgresUserRepository::new(pool.clone()));
        let teams = Arc::new(PostgresTeamRepository::new(pool.clone()));
        let projects = Arc::new(PostgresProjectRepository::new(pool.clone()));
        let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
        let submissions = Arc::new(PostgresSubmissionRepository::new(pool.clone()));
        let notifications = Arc::new(PostgresNotificationRepository::new(pool.clone()));
        let threads = Arc::new(PostgresFeedbackRepository::new(pool.clone()));

        Self {
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
                Arc::clone(&projects),
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
            feedback: FeedbackService::new(threads, submissions, clock),
        }
    }
}
