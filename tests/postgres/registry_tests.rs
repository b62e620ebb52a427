//! Project and member store tests against `PostgreSQL`.

use super::helpers::isolated_schema;
use eyre::WrapErr;
use taskboard::{
    error::ErrorKind, member::services::CreateMemberRequest,
    project::services::CreateProjectRequest,
};

#[tokio::test(flavor = "multi_thread")]
async fn project_keys_are_unique_ignoring_case() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let created = tracker
        .create_project(CreateProjectRequest::new("Infra", "inf"))
        .await
        .wrap_err("create project")?;

    let error = tracker
        .create_project(CreateProjectRequest::new("Infrastructure", "INF"))
        .await
        .expect_err("duplicate key should fail");

    assert_eq!(created.key().as_str(), "INF");
    assert_eq!(error.kind(), ErrorKind::DuplicateKey);
    let fetched = tracker.get_project(created.id()).await.wrap_err("get project")?;
    assert_eq!(fetched.id(), created.id());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn members_are_listed_by_name() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    for name in ["Margaret", "Alan", "Edsger"] {
        tracker
            .create_member(CreateMemberRequest::new(name))
            .await
            .wrap_err("create member")?;
    }

    let names: Vec<String> = tracker
        .list_members()
        .await
        .wrap_err("list members")?
        .iter()
        .map(|member| member.name().as_str().to_owned())
        .collect();

    assert_eq!(names, ["Alan", "Edsger", "Margaret"]);
    Ok(())
}
