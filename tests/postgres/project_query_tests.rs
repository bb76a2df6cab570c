//! `PostgreSQL` integration tests for visible-project aggregation.

use coursework::{
    directory::domain::Role,
    project::{
        adapters::postgres::PostgresProjectRepository,
        domain::{Project, ProjectId},
        ports::ProjectRepository,
    },
};
use rstest::rstest;

use crate::postgres::helpers::{BoxError, PostgresContext, context};

fn ids(projects: &[Project]) -> Vec<ProjectId> {
    projects.iter().map(Project::id).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_for_user_merges_created_and_team_projects(
    #[future] context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let teacher = ctx.register("teacher@uni.edu", Role::Teacher).await?;
    let student = ctx.register("student@uni.edu", Role::Student).await?;
    let own = ctx.project("Thesis", &student).await?;
    let course = ctx.project("Operating Systems", &teacher).await?;
    let unrelated = ctx.project("Graphics", &teacher).await?;

    let directory = &ctx.platform.directory;
    let lab = directory.create_team("Lab group", course.id()).await?;
    let review = directory.create_team("Review group", course.id()).await?;
    let thesis = directory.create_team("Thesis group", own.id()).await?;
    for team in [&lab, &review, &thesis] {
        directory.add_member(team.id(), student.id()).await?;
    }

    let visible = ctx
        .platform
        .project_queries
        .projects_for_user(student.id())
        .await?;

    assert_eq!(ids(&visible), vec![own.id(), course.id()]);
    assert!(!ids(&visible).contains(&unrelated.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_for_user_without_teams_lists_only_created(
    #[future] context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let teacher = ctx.register("teacher@uni.edu", Role::Teacher).await?;
    let student = ctx.register("student@uni.edu", Role::Student).await?;
    let created = ctx.project("Algorithms", &teacher).await?;
    ctx.project("Statistics", &student).await?;

    let visible = ctx
        .platform
        .project_queries
        .projects_for_user(teacher.id())
        .await?;

    assert_eq!(ids(&visible), vec![created.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_ids_skips_unknown_identifiers(
    #[future] context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context.await?;
    let teacher = ctx.register("teacher@uni.edu", Role::Teacher).await?;
    let first = ctx.project("Algorithms", &teacher).await?;
    let second = ctx.project("Statistics", &teacher).await?;
    let repository = PostgresProjectRepository::new(ctx.pool.clone());

    let listed = repository
        .list_by_ids(&[second.id(), ProjectId::new(), first.id()])
        .await?;
    let mut found = ids(&listed);
    let mut expected = vec![first.id(), second.id()];
    found.sort();
    expected.sort();

    assert_eq!(found, expected);
    assert!(repository.list_by_ids(&[]).await?.is_empty());
    Ok(())
}
