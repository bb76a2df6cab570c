//! Project aggregate root.

use super::{ProjectDomainError, ProjectId, ProjectStatus};
use crate::directory::domain::{Team, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input for creating a project.
///
/// There is no status here: a new project always starts
/// [`ProjectStatus::InProgress`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl NewProject {
    /// Creates input with the given name and no dates.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Partial update of a project's editable fields.
///
/// Status is deliberately not a field: it only moves through
/// [`Project::transition_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    name: Option<String>,
    description: Option<Option<String>>,
    start_date: Option<NaiveDate>,
    end_date: Option<Option<NaiveDate>>,
}

impl ProjectPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Replaces the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(Some(end_date));
        self
    }

    /// Removes the end date.
    #[must_use]
    pub const fn clear_end_date(mut self) -> Self {
        self.end_date = Some(None);
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    status: ProjectStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted start date.
    pub start_date: NaiveDate,
    /// Persisted end date.
    pub end_date: Option<NaiveDate>,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new `IN_PROGRESS` project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError`] when the name is blank, a date is
    /// missing, or the end date precedes the start date.
    pub fn create(
        input: NewProject,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let NewProject {
            name,
            description,
            start_date,
            end_date,
        } = input;
        let project_name = validate_name(&name)?;
        let start = start_date.ok_or(ProjectDomainError::MissingStartDate)?;
        let end = end_date.ok_or(ProjectDomainError::MissingEndDate)?;
        validate_dates(start, Some(end))?;

        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: project_name,
            description,
            start_date: start,
            end_date: Some(end),
            status: ProjectStatus::InProgress,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            status: data.status,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the end date, if set.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a field patch. The status is never touched.
    ///
    /// The patch is validated as a whole before anything is assigned, so a
    /// rejected patch leaves the project unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] for a blank name, or
    /// [`ProjectDomainError::EndBeforeStart`] when the patch supplies dates
    /// that would end the project before it starts.
    pub fn apply_patch(
        &mut self,
        patch: ProjectPatch,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectPatch {
            name,
            description,
            start_date,
            end_date,
        } = patch;

        let next_name = match name {
            Some(candidate) => validate_name(&candidate)?,
            None => self.name.clone(),
        };
        let dates_changed = start_date.is_some() || end_date.is_some();
        let next_start = start_date.unwrap_or(self.start_date);
        let next_end = end_date.unwrap_or(self.end_date);
        // A cancel may have stamped an end date before the start date; only
        // a patch that touches the dates is held to the ordering rule.
        if dates_changed {
            validate_dates(next_start, next_end)?;
        }

        self.name = next_name;
        if let Some(next_description) = description {
            self.description = next_description;
        }
        self.start_date = next_start;
        self.end_date = next_end;
        self.touch(clock);
        Ok(())
    }

    /// Moves the project to `target` if the transition table allows it.
    ///
    /// Completing stamps today's date as the end date only when none is set.
    /// Canceling always overwrites the end date with today's date. "Today" is
    /// the server-local calendar date; timestamps stay in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidStatusTransition`] when
    /// `(current, target)` is not in [`super::ALLOWED_TRANSITIONS`]; the
    /// project is left unchanged.
    pub fn transition_to(
        &mut self,
        target: ProjectStatus,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(ProjectDomainError::InvalidStatusTransition {
                project_id: self.id,
                from: self.status,
                to: target,
            });
        }

        let now = clock.utc();
        let today = clock.local().date_naive();
        match target {
            ProjectStatus::Completed => {
                if self.end_date.is_none() {
                    self.end_date = Some(today);
                }
            }
            ProjectStatus::Canceled => self.end_date = Some(today),
            ProjectStatus::InProgress => {}
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Returns `true` when the user created the project or belongs to one of
    /// the given teams working on it.
    #[must_use]
    pub fn is_visible_to(&self, user_id: UserId, member_teams: &[Team]) -> bool {
        self.created_by == user_id
            || member_teams
                .iter()
                .any(|team| team.project_id() == self.id)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_name(name: &str) -> Result<String, ProjectDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn validate_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ProjectDomainError> {
    match end {
        Some(end_date) if end_date < start => Err(ProjectDomainError::EndBeforeStart {
            start,
            end: end_date,
        }),
        _ => Ok(()),
    }
}
