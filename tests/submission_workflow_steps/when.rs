//! When steps for submission workflow BDD scenarios.

use super::world::{SubmissionWorld, run_async};
use coursework::submission::domain::NewSubmission;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{email}" submits "{content}""#)]
fn user_submits(
    world: &mut SubmissionWorld,
    email: String,
    content: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user(&email)?.id();
    let task_id = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?
        .id();

    run_async(
        world
            .submissions
            .create(NewSubmission::new(task_id, user_id, content)),
    )
    .wrap_err("submit work in scenario")?;
    Ok(())
}
