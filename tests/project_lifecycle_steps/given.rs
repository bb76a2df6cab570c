//! Given steps for project lifecycle BDD scenarios.

use super::world::{ProjectLifecycleWorld, run_async};
use chrono::NaiveDate;
use coursework::{
    directory::{
        domain::{Email, Role, User},
        ports::UserRepository,
    },
    project::services::{CreateProjectRequest, TransitionProjectRequest},
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a registered teacher "{email}""#)]
fn registered_teacher(world: &mut ProjectLifecycleWorld, email: String) -> Result<(), eyre::Report> {
    let teacher = User::new("Teacher", Email::new(email)?, Role::Teacher, &DefaultClock)?;
    run_async(world.users.store(&teacher)).wrap_err("store teacher for scenario")?;
    world.teacher = Some(teacher);
    Ok(())
}

#[given(r#"a project "{name}" ending on "{end_date}""#)]
fn project_ending_on(
    world: &mut ProjectLifecycleWorld,
    name: String,
    end_date: String,
) -> Result<(), eyre::Report> {
    let teacher = world
        .teacher
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing teacher in scenario world"))?;
    let end = NaiveDate::parse_from_str(&end_date, "%Y-%m-%d")
        .wrap_err("parse project end date")?;
    let start = NaiveDate::from_ymd_opt(2026, 1, 15)
        .ok_or_else(|| eyre::eyre!("invalid start date"))?;

    let created = run_async(
        world.service.create(
            CreateProjectRequest::new(name, teacher.id())
                .with_start_date(start)
                .with_end_date(end),
        ),
    )
    .wrap_err("create project for scenario")?;
    world.project = Some(created);
    Ok(())
}

#[given(r#"the project has been transitioned to "{target_status}""#)]
fn project_has_been_transitioned(
    world: &mut ProjectLifecycleWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let project = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;

    let transitioned = run_async(
        world
            .service
            .transition(TransitionProjectRequest::new(project.id(), target_status)),
    )
    .wrap_err("transition project in scenario setup")?;
    world.project = Some(transitioned);
    Ok(())
}
