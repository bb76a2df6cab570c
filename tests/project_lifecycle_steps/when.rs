//! When steps for project lifecycle BDD scenarios.

use super::world::{ProjectLifecycleWorld, run_async};
use coursework::project::services::TransitionProjectRequest;
use rstest_bdd_macros::when;

#[when(r#"the project is transitioned to "{target_status}""#)]
fn transition_project(
    world: &mut ProjectLifecycleWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    let project = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;

    let result = run_async(
        world
            .service
            .transition(TransitionProjectRequest::new(project.id(), target_status)),
    );
    if let Ok(ref updated) = result {
        world.project = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}
