//! Service layer for creating, editing, and listing tasks.

use crate::directory::{
    domain::{DirectoryDomainError, Email},
    ports::{DirectoryRepositoryError, TeamRepository, UserRepository},
};
use crate::error::{Classify, FailureKind};
use crate::lookup::{EntityKind, NotFoundError, ResolveError, resolve};
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskCoordinatorError {
    /// Task validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The acting user's email is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] DirectoryDomainError),
    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// User or team lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

impl<E> From<ResolveError<E>> for TaskCoordinatorError
where
    E: Into<Self>,
{
    fn from(err: ResolveError<E>) -> Self {
        match err {
            ResolveError::NotFound(missing) => Self::NotFound(missing),
            ResolveError::Lookup(inner) => inner.into(),
        }
    }
}

impl Classify for TaskCoordinatorError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) | Self::InvalidEmail(_) => FailureKind::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                FailureKind::NotFound
            }
            Self::Repository(TaskRepositoryError::DuplicateTask(_)) => FailureKind::Conflict,
            Self::Repository(TaskRepositoryError::Persistence(_))
            | Self::Project(_)
            | Self::Directory(_) => FailureKind::Storage,
        }
    }
}

/// Result type for task coordinator operations.
pub type TaskCoordinatorResult<T> = Result<T, TaskCoordinatorError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskCoordinatorService<K, P, U, T, C>
where
    K: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<K>,
    projects: Arc<P>,
    users: Arc<U>,
    teams: Arc<T>,
    clock: Arc<C>,
}

impl<K, P, U, T, C> TaskCoordinatorService<K, P, U, T, C>
where
    K: TaskRepository,
    P: ProjectRepository,
    U: UserRepository,
    T: TeamRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task coordinator.
    #[must_use]
    pub const fn new(
        tasks: Arc<K>,
        projects: Arc<P>,
        users: Arc<U>,
        teams: Arc<T>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            projects,
            users,
            teams,
            clock,
        }
    }

    /// Creates a task after resolving its project and creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::Domain`] when the title is blank and
    /// [`TaskCoordinatorError::NotFound`] naming the project or the creator
    /// when either does not exist.
    pub async fn create(&self, input: NewTask) -> TaskCoordinatorResult<Task> {
        let project_id = input.project_id();
        let creator_id = input.created_by();
        let task = Task::create(input, &*self.clock)?;

        resolve(
            EntityKind::Project,
            project_id,
            self.projects.find_by_id(project_id),
        )
        .await?;
        resolve(EntityKind::User, creator_id, self.users.find_by_id(creator_id)).await?;

        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), project_id = %project_id, "task created");
        Ok(task)
    }

    /// Applies a patch. A project or creator named by the patch must exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::NotFound`] when the task, or a
    /// project or creator named by the patch, does not exist.
    pub async fn update(&self, task_id: TaskId, patch: TaskPatch) -> TaskCoordinatorResult<Task> {
        let mut task = self.find_by_id(task_id).await?;

        if let Some(project_id) = patch.project_id() {
            resolve(
                EntityKind::Project,
                project_id,
                self.projects.find_by_id(project_id),
            )
            .await?;
        }
        if let Some(creator_id) = patch.created_by() {
            resolve(EntityKind::User, creator_id, self.users.find_by_id(creator_id)).await?;
        }

        task.apply_patch(patch, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Overwrites a task's status. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::NotFound`] when the task does not
    /// exist.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskCoordinatorResult<Task> {
        let mut task = self.find_by_id(task_id).await?;
        let previous = task.status();
        task.set_status(status, &*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, from = %previous, to = %status, "task status overwritten");
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::NotFound`] when the task does not
    /// exist.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskCoordinatorResult<Task> {
        Ok(resolve(EntityKind::Task, task_id, self.tasks.find_by_id(task_id)).await?)
    }

    /// Returns the project's tasks as seen by the user with `email`.
    ///
    /// Teachers see every task. Other users see the tasks only when they
    /// created the project or belong to one of its teams, and an empty list
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::NotFound`] when the user or project
    /// does not exist.
    pub async fn tasks_for_project_and_user(
        &self,
        project_id: ProjectId,
        email: &str,
    ) -> TaskCoordinatorResult<Vec<Task>> {
        let normalized = Email::new(email)?;
        let user = resolve(
            EntityKind::User,
            &normalized,
            self.users.find_by_email(&normalized),
        )
        .await?;
        let project = resolve(
            EntityKind::Project,
            project_id,
            self.projects.find_by_id(project_id),
        )
        .await?;

        if !user.role().has_full_visibility() {
            let member_teams = self.teams.list_for_member(user.id()).await?;
            if !project.is_visible_to(user.id(), &member_teams) {
                debug!(
                    project_id = %project_id,
                    user_id = %user.id(),
                    "project not visible to user; returning no tasks"
                );
                return Ok(Vec::new());
            }
        }
        Ok(self.tasks.list_by_project(project_id).await?)
    }
}
