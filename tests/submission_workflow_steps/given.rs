//! Given steps for submission workflow BDD scenarios.

use super::world::{SubmissionWorld, run_async};
use chrono::NaiveDate;
use coursework::{
    directory::{
        domain::{Email, Role, User},
        ports::UserRepository,
    },
    project::{
        domain::{NewProject, Project},
        ports::ProjectRepository,
    },
    task::{
        domain::{NewTask, Task},
        ports::TaskRepository,
    },
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a registered user "{email}" with role "{role}""#)]
fn registered_user(
    world: &mut SubmissionWorld,
    email: String,
    role: String,
) -> Result<(), eyre::Report> {
    let parsed_role =
        Role::try_from(role.as_str()).map_err(|err| eyre::eyre!("invalid role: {err}"))?;
    let user = User::new("Member", Email::new(email.as_str())?, parsed_role, &DefaultClock)?;
    run_async(world.users.store(&user)).wrap_err("store user for scenario")?;
    world.registered.insert(email, user);
    Ok(())
}

#[given(r#"a task "{title}" in a project owned by "{email}""#)]
fn task_in_owned_project(
    world: &mut SubmissionWorld,
    title: String,
    email: String,
) -> Result<(), eyre::Report> {
    let owner = world.user(&email)?.id();
    let start =
        NaiveDate::from_ymd_opt(2026, 2, 1).ok_or_else(|| eyre::eyre!("invalid start date"))?;
    let end =
        NaiveDate::from_ymd_opt(2026, 6, 30).ok_or_else(|| eyre::eyre!("invalid end date"))?;

    let project = Project::create(
        NewProject::new("Compilers")
            .with_start_date(start)
            .with_end_date(end),
        owner,
        &DefaultClock,
    )?;
    run_async(world.projects.store(&project)).wrap_err("store project for scenario")?;

    let task = Task::create(NewTask::new(project.id(), owner, title), &DefaultClock)?;
    run_async(world.tasks.store(&task)).wrap_err("store task for scenario")?;
    world.task = Some(task);
    Ok(())
}
