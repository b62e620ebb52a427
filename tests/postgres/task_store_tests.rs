//! Task persistence tests against `PostgreSQL`.

use super::helpers::isolated_schema;
use eyre::WrapErr;
use taskboard::{
    error::ErrorKind,
    history::domain::HistoryAction,
    member::services::CreateMemberRequest,
    project::services::CreateProjectRequest,
    task::{
        domain::{TaskFilter, TaskPriority, TaskStatus},
        services::{CreateTaskRequest, UpdateTaskRequest},
    },
};

#[tokio::test(flavor = "multi_thread")]
async fn task_fields_survive_a_round_trip() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let project = tracker
        .create_project(CreateProjectRequest::new("Platform", "plat"))
        .await
        .wrap_err("create project")?;
    let member = tracker
        .create_member(CreateMemberRequest::new("Ada"))
        .await
        .wrap_err("create member")?;

    let created = tracker
        .create_task(
            CreateTaskRequest::new("Tune vacuum")
                .with_description("Autovacuum thresholds")
                .with_status("in_progress")
                .with_priority("high")
                .with_assignee(member.id().to_string())
                .with_tags(["db".to_owned(), "ops".to_owned()])
                .with_project(project.id()),
        )
        .await
        .wrap_err("create task")?;
    let fetched = tracker.get_task(created.id()).await.wrap_err("get task")?;

    assert_eq!(fetched.title(), created.title());
    assert_eq!(fetched.description(), Some("Autovacuum thresholds"));
    assert_eq!(fetched.status(), TaskStatus::InProgress);
    assert_eq!(fetched.priority(), TaskPriority::High);
    assert_eq!(fetched.assignee_id(), Some(member.id()));
    assert_eq!(fetched.tags().as_slice(), ["db".to_owned(), "ops".to_owned()]);
    assert_eq!(fetched.project_id(), Some(project.id()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn partial_update_clears_assignee_and_keeps_the_rest() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let member = tracker
        .create_member(CreateMemberRequest::new("Grace"))
        .await
        .wrap_err("create member")?;
    let created = tracker
        .create_task(
            CreateTaskRequest::new("Rotate keys")
                .with_description("Quarterly")
                .with_assignee(member.id().to_string()),
        )
        .await
        .wrap_err("create task")?;

    let updated = tracker
        .update_task(created.id(), UpdateTaskRequest::new().clear_assignee())
        .await
        .wrap_err("update task")?;

    assert_eq!(updated.assignee_id(), None);
    assert_eq!(updated.title().as_str(), "Rotate keys");
    assert_eq!(updated.description(), Some("Quarterly"));
    let history = tracker.task_history(created.id()).await.wrap_err("history")?;
    let newest = history.first().ok_or_else(|| eyre::eyre!("missing entry"))?;
    assert_eq!(newest.action(), HistoryAction::Update);
    assert_eq!(newest.details(), "Assignee changed");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_tag_and_status() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let tagged = tracker
        .create_task(CreateTaskRequest::new("Tagged").with_tags(["urgent".to_owned()]))
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(
            CreateTaskRequest::new("Tagged but done")
                .with_status("done")
                .with_tags(["urgent".to_owned()]),
        )
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Plain"))
        .await
        .wrap_err("create task")?;

    let listed = tracker
        .list_tasks(
            &TaskFilter::new()
                .with_tag("urgent")
                .with_status(TaskStatus::Todo),
        )
        .await
        .wrap_err("list tasks")?;

    let ids: Vec<_> = listed.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![tagged.id()]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn admission_counts_persisted_in_progress_tasks() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let member = tracker
        .create_member(CreateMemberRequest::new("Linus"))
        .await
        .wrap_err("create member")?;
    for index in 0..5 {
        tracker
            .create_task(
                CreateTaskRequest::new(format!("Busy {index}"))
                    .with_status("in_progress")
                    .with_assignee(member.id().to_string()),
            )
            .await
            .wrap_err("create task")?;
    }
    let spare = tracker
        .create_task(CreateTaskRequest::new("Spare"))
        .await
        .wrap_err("create task")?;

    let error = tracker
        .assign_task(spare.id(), &member.id().to_string())
        .await
        .expect_err("assign should be refused");

    assert_eq!(error.kind(), ErrorKind::CapacityExceeded);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn history_outlives_the_task() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let task = tracker
        .create_task(CreateTaskRequest::new("Ephemeral"))
        .await
        .wrap_err("create task")?;
    tracker.advance_task(task.id()).await.wrap_err("advance")?;

    tracker.delete_task(task.id()).await.wrap_err("delete")?;

    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    let actions: Vec<HistoryAction> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(actions, [HistoryAction::StatusChange, HistoryAction::Create]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn long_free_text_fields_are_stored() -> eyre::Result<()> {
    let Some(db) = isolated_schema()? else {
        return Ok(());
    };
    let tracker = &db.tracker;
    let long_name = "n".repeat(300);
    let long_key = "k".repeat(80);
    let long_title = "t".repeat(300);

    let member = tracker
        .create_member(CreateMemberRequest::new(long_name.clone()).with_role("r".repeat(150)))
        .await
        .wrap_err("create member")?;
    let project = tracker
        .create_project(CreateProjectRequest::new(long_name.clone(), long_key))
        .await
        .wrap_err("create project")?;
    let task = tracker
        .create_task(
            CreateTaskRequest::new(long_title.clone())
                .with_assignee(member.id().to_string())
                .with_project(project.id()),
        )
        .await
        .wrap_err("create task")?;

    let fetched = tracker.get_task(task.id()).await.wrap_err("get task")?;
    assert_eq!(fetched.title().as_str(), long_title);
    assert_eq!(project.key().as_str(), "K".repeat(80));
    assert_eq!(member.name().as_str(), long_name);
    Ok(())
}
