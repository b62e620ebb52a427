//! CSV export and import tests through the tracker facade.

use super::helpers::{add_member, tracker};
use eyre::WrapErr;
use rstest::rstest;
use taskboard::{
    error::ErrorKind,
    history::domain::HistoryAction,
    project::services::CreateProjectRequest,
    task::{
        adapters::csv::CSV_HEADER,
        domain::{TaskPriority, TaskStatus},
        services::CreateTaskRequest,
    },
    tracker::Tracker,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_export_is_header_only(tracker: Tracker) -> eyre::Result<()> {
    let document = tracker.export_csv(None).await.wrap_err("export")?;

    assert_eq!(document, CSV_HEADER);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_quotes_fields_and_names_assignee(tracker: Tracker) -> eyre::Result<()> {
    let ada = add_member(&tracker, "Ada").await?;
    tracker
        .create_task(
            CreateTaskRequest::new("Ship, v2")
                .with_description(r#"Say "hi""#)
                .with_status("in_progress")
                .with_priority("high")
                .with_assignee(ada.id().to_string())
                .with_tags(["release".to_owned(), "ops".to_owned()]),
        )
        .await
        .wrap_err("create task")?;

    let document = tracker.export_csv(None).await.wrap_err("export")?;

    let expected = format!(
        "{CSV_HEADER}\n\"TASK-001\",\"Ship, v2\",\"Say \"\"hi\"\"\",\"in_progress\",\"high\",\"Ada\",\"release;ops\""
    );
    assert_eq!(document, expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_falls_back_to_raw_identifier_for_missing_member(
    tracker: Tracker,
) -> eyre::Result<()> {
    let member = add_member(&tracker, "Temporary").await?;
    tracker
        .create_task(CreateTaskRequest::new("Orphaned").with_assignee(member.id().to_string()))
        .await
        .wrap_err("create task")?;
    tracker.delete_member(member.id()).await.wrap_err("delete member")?;

    let document = tracker.export_csv(None).await.wrap_err("export")?;

    assert!(document.contains(&format!("\"{}\"", member.id())));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exported_tasks_import_into_another_tracker(tracker: Tracker) -> eyre::Result<()> {
    let ada = add_member(&tracker, "Ada").await?;
    tracker
        .create_task(
            CreateTaskRequest::new("Design schema")
                .with_description("Tables and indexes")
                .with_status("done")
                .with_priority("low")
                .with_assignee(ada.id().to_string())
                .with_tags(["db".to_owned()]),
        )
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Write migrations").with_status("blocked"))
        .await
        .wrap_err("create task")?;
    let document = tracker.export_csv(None).await.wrap_err("export")?;

    let target = Tracker::in_memory();
    let project = target
        .create_project(CreateProjectRequest::new("Backend", "be"))
        .await
        .wrap_err("create project")?;
    let report = target
        .import_csv(&document, Some(project.id()))
        .await
        .wrap_err("import")?;

    assert_eq!(report.failed, 0);
    assert_eq!(report.created.len(), 2);
    let schema = report
        .created
        .iter()
        .find(|task| task.title().as_str() == "Design schema")
        .ok_or_else(|| eyre::eyre!("missing imported task"))?;
    assert_eq!(schema.description(), Some("Tables and indexes"));
    assert_eq!(schema.status(), TaskStatus::Done);
    assert_eq!(schema.priority(), TaskPriority::Low);
    assert_eq!(schema.assignee_id(), None);
    assert_eq!(schema.tags().as_slice(), ["db".to_owned()]);
    assert_eq!(schema.project_id(), Some(project.id()));

    let history = target.task_history(schema.id()).await.wrap_err("history")?;
    let actions: Vec<HistoryAction> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(actions, [HistoryAction::Create]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_fills_gaps_with_defaults_and_skips_short_rows(
    tracker: Tracker,
) -> eyre::Result<()> {
    let document = concat!(
        "Task ID,Title,Description,Status,Priority,Assignee,Tags\n",
        "\"X-1\",\"\",\"No title here\",\"archived\",\"urgent\",\"\",\" a ;b;a\"\n",
        "lonely\n",
        "\n",
    );

    let report = tracker.import_csv(document, None).await.wrap_err("import")?;

    assert_eq!(report.created.len(), 1);
    let task = report
        .created
        .first()
        .ok_or_else(|| eyre::eyre!("missing imported task"))?;
    assert_eq!(task.title().as_str(), "Imported Task 1");
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.tags().as_slice(), ["a".to_owned(), "b".to_owned()]);
    Ok(())
}

#[rstest]
#[case("")]
#[case("Task ID,Title,Description,Status,Priority,Assignee,Tags")]
#[tokio::test(flavor = "multi_thread")]
async fn import_without_data_rows_is_rejected(tracker: Tracker, #[case] document: &str) {
    let error = tracker
        .import_csv(document, None)
        .await
        .expect_err("import should fail");

    assert_eq!(error.kind(), ErrorKind::Validation);
}
