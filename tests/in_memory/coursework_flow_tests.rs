//! End-to-end coursework flow over the in-memory adapters.

use super::helpers::{Campus, campus, date};
use coursework::{
    directory::domain::Role,
    error::{Classify, FailureKind},
    lookup::EntityKind,
    notification::domain::{SUBMISSION_RECEIVED_KIND, SUBMISSION_RECEIVED_MESSAGE},
    project::{
        domain::ProjectStatus,
        services::{ProjectLifecycleError, TransitionProjectRequest},
    },
    submission::{domain::NewSubmission, services::SubmissionWorkflowError},
    task::domain::{NewTask, TaskStatus},
};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_reaches_feedback_and_notifies_student(campus: Campus) -> eyre::Result<()> {
    let teacher = campus.register("teacher@uni.edu", Role::Teacher).await?;
    let student = campus.register("student@uni.edu", Role::Student).await?;
    let project = campus.project("Compilers", &teacher).await?;
    let task = campus
        .tasks
        .create(
            NewTask::new(project.id(), teacher.id(), "Lexer")
                .with_due_date(date(2026, 3, 1)?),
        )
        .await?;

    let submission = campus
        .submissions
        .create(NewSubmission::new(task.id(), student.id(), "lexer.rs").with_file_ref("s3://lexer"))
        .await?;

    let inbox = campus.notifications.list_for_user("student@uni.edu").await?;
    let [notification] = inbox.as_slice() else {
        bail!("expected one notification, got {}", inbox.len());
    };
    ensure!(notification.message() == SUBMISSION_RECEIVED_MESSAGE);
    ensure!(notification.kind() == SUBMISSION_RECEIVED_KIND);
    ensure!(!notification.is_read());

    let read = campus.notifications.mark_as_read(notification.id()).await?;
    ensure!(read.is_read());

    let entry = campus
        .feedback
        .create_feedback(submission.id(), "Handle unicode identifiers")
        .await?;
    campus
        .feedback
        .create_response(entry.id(), "Added XID_Start support")
        .await?;
    ensure!(
        campus
            .feedback
            .list_feedback_for_submission(submission.id())
            .await?
            == vec![entry]
    );

    let done = campus
        .tasks
        .update_status(task.id(), TaskStatus::Completed)
        .await?;
    ensure!(done.status() == TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_against_missing_task_leaves_no_notification(
    campus: Campus,
) -> eyre::Result<()> {
    let student = campus.register("student@uni.edu", Role::Student).await?;

    let result = campus
        .submissions
        .create(NewSubmission::new(
            coursework::task::domain::TaskId::new(),
            student.id(),
            "orphan",
        ))
        .await;

    let Err(SubmissionWorkflowError::NotFound(missing)) = result else {
        bail!("expected missing task, got {result:?}");
    };
    ensure!(missing.kind == EntityKind::Task);
    ensure!(
        campus
            .notifications
            .list_for_user("student@uni.edu")
            .await?
            .is_empty()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_project_can_still_be_canceled_but_not_reopened(
    campus: Campus,
) -> eyre::Result<()> {
    let teacher = campus.register("teacher@uni.edu", Role::Teacher).await?;
    let project = campus.project("Databases", &teacher).await?;

    let completed = campus
        .projects
        .transition(TransitionProjectRequest::new(project.id(), "completed"))
        .await?;
    ensure!(completed.status() == ProjectStatus::Completed);
    ensure!(completed.end_date() == Some(date(2026, 6, 30)?));

    let canceled = campus
        .projects
        .transition(TransitionProjectRequest::new(project.id(), "CANCELED"))
        .await?;
    ensure!(canceled.status() == ProjectStatus::Canceled);

    let reopened = campus
        .projects
        .transition(TransitionProjectRequest::new(project.id(), "IN_PROGRESS"))
        .await;
    let Err(err) = reopened else {
        bail!("canceled project must not reopen");
    };
    ensure!(err.failure_kind() == FailureKind::InvalidTransition);

    let unknown = campus
        .projects
        .transition(TransitionProjectRequest::new(project.id(), "ARCHIVED"))
        .await;
    ensure!(matches!(unknown, Err(ProjectLifecycleError::InvalidStatus(_))));
    Ok(())
}
