//! Then steps for project lifecycle BDD scenarios.

use super::world::ProjectLifecycleWorld;
use chrono::{Local, NaiveDate};
use coursework::project::{
    domain::{ProjectDomainError, ProjectStatus},
    services::ProjectLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the project status is "{status}""#)]
fn project_status_is(world: &ProjectLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ProjectStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let project = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project"))?;

    if project.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            project.status()
        ));
    }
    Ok(())
}

#[then(r#"the project end date is "{end_date}""#)]
fn project_end_date_is(
    world: &ProjectLifecycleWorld,
    end_date: String,
) -> Result<(), eyre::Report> {
    let expected = NaiveDate::parse_from_str(&end_date, "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid expected date: {err}"))?;
    let project = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project"))?;

    if project.end_date() != Some(expected) {
        return Err(eyre::eyre!(
            "expected end date {expected}, found {:?}",
            project.end_date()
        ));
    }
    Ok(())
}

#[then("the project end date is today")]
fn project_end_date_is_today(world: &ProjectLifecycleWorld) -> Result<(), eyre::Report> {
    let before = Local::now().date_naive();
    let project = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project"))?;
    let end = project
        .end_date()
        .ok_or_else(|| eyre::eyre!("canceled project has no end date"))?;
    let after = Local::now().date_naive();

    if end != before && end != after {
        return Err(eyre::eyre!("expected today's date, found {end}"));
    }
    Ok(())
}

#[then("the transition fails with an invalid status transition error")]
fn transition_fails_with_invalid_status_transition(
    world: &ProjectLifecycleWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(ProjectLifecycleError::Domain(
            ProjectDomainError::InvalidStatusTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the transition fails with an invalid status error")]
fn transition_fails_with_invalid_status(
    world: &ProjectLifecycleWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(result, Err(ProjectLifecycleError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}
