//! Read filtering by role and team membership.

use super::helpers::{Campus, campus};
use coursework::{
    directory::domain::Role,
    submission::domain::{AdministrativeAccess, NewSubmission},
    task::domain::NewTask,
};
use eyre::{ensure, eyre};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_membership_grants_project_and_task_visibility(campus: Campus) -> eyre::Result<()> {
    let teacher = campus.register("teacher@uni.edu", Role::Teacher).await?;
    let member = campus.register("member@uni.edu", Role::Student).await?;
    let outsider = campus.register("outsider@uni.edu", Role::Student).await?;
    let project = campus.project("Operating Systems", &teacher).await?;
    let task = campus
        .tasks
        .create(NewTask::new(project.id(), teacher.id(), "Scheduler"))
        .await?;

    let team = campus.directory.create_team("Group A", project.id()).await?;
    campus.directory.add_member(team.id(), member.id()).await?;

    ensure!(
        campus.project_queries.projects_for_user(member.id()).await? == vec![project.clone()]
    );
    ensure!(
        campus
            .project_queries
            .projects_for_user(outsider.id())
            .await?
            .is_empty()
    );

    let seen_by_member = campus
        .tasks
        .tasks_for_project_and_user(project.id(), "member@uni.edu")
        .await?;
    ensure!(seen_by_member == vec![task.clone()]);

    let seen_by_outsider = campus
        .tasks
        .tasks_for_project_and_user(project.id(), "outsider@uni.edu")
        .await?;
    ensure!(seen_by_outsider.is_empty());

    let seen_by_teacher = campus
        .tasks
        .tasks_for_project_and_user(project.id(), "TEACHER@uni.edu")
        .await?;
    ensure!(seen_by_teacher == vec![task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn students_see_only_their_own_submissions(campus: Campus) -> eyre::Result<()> {
    let teacher = campus.register("teacher@uni.edu", Role::Teacher).await?;
    let alice = campus.register("alice@uni.edu", Role::Student).await?;
    let bob = campus.register("bob@uni.edu", Role::Student).await?;
    let admin = campus.register("admin@uni.edu", Role::Admin).await?;
    let project = campus.project("Networks", &teacher).await?;
    let task = campus
        .tasks
        .create(NewTask::new(project.id(), teacher.id(), "TCP handshake"))
        .await?;

    let from_alice = campus
        .submissions
        .create(NewSubmission::new(task.id(), alice.id(), "syn"))
        .await?;
    let from_bob = campus
        .submissions
        .create(NewSubmission::new(task.id(), bob.id(), "ack"))
        .await?;

    let alice_view = campus
        .submissions
        .submissions_by_task(task.id(), "alice@uni.edu")
        .await?;
    ensure!(alice_view == vec![from_alice.clone()]);

    let teacher_view = campus
        .submissions
        .submissions_by_task(task.id(), "teacher@uni.edu")
        .await?;
    ensure!(teacher_view.len() == 2);
    ensure!(teacher_view.contains(&from_alice) && teacher_view.contains(&from_bob));

    let admin_view = campus
        .submissions
        .submissions_by_task(task.id(), "admin@uni.edu")
        .await?;
    ensure!(admin_view.is_empty());

    let access =
        AdministrativeAccess::for_user(&admin).ok_or_else(|| eyre!("admin must get access"))?;
    ensure!(campus.submissions.list_all(access).await?.len() == 2);
    ensure!(AdministrativeAccess::for_user(&teacher).is_none());
    Ok(())
}
