//! `PostgreSQL` integration tests for submission and notification writes.

use coursework::{
    directory::domain::Role,
    notification::{
        adapters::postgres::PostgresNotificationRepository,
        domain::{Notification, SUBMISSION_RECEIVED_KIND},
        ports::NotificationRepository,
    },
    submission::{
        adapters::postgres::PostgresSubmissionRepository,
        domain::{NewSubmission, Submission},
        ports::{SubmissionRepository, SubmissionRepositoryError},
    },
    task::domain::NewTask,
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{BoxError, PostgresContext, context};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_notification_id_rolls_back_the_submission(
    #[future] context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let teacher = ctx.register("teacher@uni.edu", Role::Teacher).await?;
    let student = ctx.register("student@uni.edu", Role::Student).await?;
    let project = ctx.project("Databases", &teacher).await?;
    let task = ctx
        .platform
        .tasks
        .create(NewTask::new(project.id(), teacher.id(), "Schema design"))
        .await?;
    let submissions = PostgresSubmissionRepository::new(ctx.pool.clone());
    let notifications = PostgresNotificationRepository::new(ctx.pool.clone());

    let first = Submission::accept(
        NewSubmission::new(task.id(), student.id(), "v1"),
        &DefaultClock,
    );
    let note = Notification::submission_received(student.id(), &DefaultClock);
    submissions.store_with_notification(&first, &note).await?;

    let second = Submission::accept(
        NewSubmission::new(task.id(), student.id(), "v2"),
        &DefaultClock,
    );
    let result = submissions.store_with_notification(&second, &note).await;

    assert!(
        matches!(result, Err(SubmissionRepositoryError::DuplicateNotification(id)) if id == note.id()),
        "expected duplicate notification, got {result:?}"
    );
    assert!(submissions.find_by_id(second.id()).await?.is_none());
    let stored: Vec<_> = submissions
        .list_by_task(task.id())
        .await?
        .iter()
        .map(Submission::id)
        .collect();
    assert_eq!(stored, vec![first.id()]);
    assert_eq!(notifications.list_for_user(student.id()).await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workflow_submission_lands_in_the_submitters_inbox(
    #[future] context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let teacher = ctx.register("teacher@uni.edu", Role::Teacher).await?;
    let student = ctx.register("student@uni.edu", Role::Student).await?;
    let project = ctx.project("Networks", &teacher).await?;
    let task = ctx
        .platform
        .tasks
        .create(NewTask::new(project.id(), teacher.id(), "Routing table"))
        .await?;

    let submission = ctx
        .platform
        .submissions
        .create(NewSubmission::new(task.id(), student.id(), "routes.csv").with_file_ref("s3://routes"))
        .await?;

    let found = ctx.platform.submissions.find_by_id(submission.id()).await?;
    assert_eq!(found.file_ref(), Some("s3://routes"));
    let inbox = ctx
        .platform
        .notifications
        .list_for_user("student@uni.edu")
        .await?;
    let [notification] = inbox.as_slice() else {
        return Err(format!("expected one notification, got {}", inbox.len()).into());
    };
    assert_eq!(notification.kind(), SUBMISSION_RECEIVED_KIND);
    assert!(!notification.is_read());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn long_notification_kind_is_stored_whole(
    #[future] context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let student = ctx.register("student@uni.edu", Role::Student).await?;
    let kind = "COURSE_ANNOUNCEMENT_".repeat(10);

    let created = ctx
        .platform
        .notifications
        .create(student.id(), "Room change", kind.as_str())
        .await?;

    let found = ctx.platform.notifications.find_by_id(created.id()).await?;
    assert_eq!(found.kind(), kind);
    Ok(())
}
