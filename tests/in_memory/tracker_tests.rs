//! Task workflow tests driven through the tracker facade.

use super::helpers::{add_member, fill_in_progress, tracker};
use eyre::WrapErr;
use rstest::rstest;
use taskboard::{
    error::ErrorKind,
    history::domain::HistoryAction,
    project::services::CreateProjectRequest,
    task::{
        domain::{TaskFilter, TaskId, TaskPriority, TaskStatus},
        services::{CreateTaskRequest, TaskWorkflowError, UpdateTaskRequest},
    },
    tracker::Tracker,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_uses_defaults_and_records_history(tracker: Tracker) -> eyre::Result<()> {
    let task = tracker
        .create_task(CreateTaskRequest::new("  Write release notes "))
        .await
        .wrap_err("create task")?;

    assert_eq!(task.title().as_str(), "Write release notes");
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.assignee_id(), None);
    assert_eq!(task.created_at(), task.updated_at());

    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    assert_eq!(history.len(), 1);
    let entry = history.first().ok_or_else(|| eyre::eyre!("missing entry"))?;
    assert_eq!(entry.action(), HistoryAction::Create);
    assert_eq!(entry.details(), "Task created: Write release notes");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advance_walks_the_sequence_and_stops_at_done(tracker: Tracker) -> eyre::Result<()> {
    let task = tracker
        .create_task(CreateTaskRequest::new("Review PR"))
        .await
        .wrap_err("create task")?;

    let first = tracker.advance_task(task.id()).await.wrap_err("advance 1")?;
    let second = tracker.advance_task(task.id()).await.wrap_err("advance 2")?;
    let third = tracker.advance_task(task.id()).await.wrap_err("advance 3")?;

    assert_eq!(first.status(), TaskStatus::InProgress);
    assert_eq!(second.status(), TaskStatus::Done);
    assert_eq!(third, second);

    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    let actions: Vec<HistoryAction> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(
        actions,
        [
            HistoryAction::StatusChange,
            HistoryAction::StatusChange,
            HistoryAction::Create
        ]
    );
    let newest = history.first().ok_or_else(|| eyre::eyre!("missing entry"))?;
    assert_eq!(newest.details(), "Status advanced from in_progress to done");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_task_is_returned_unchanged(tracker: Tracker) -> eyre::Result<()> {
    let task = tracker
        .create_task(CreateTaskRequest::new("Waiting on vendor").with_status("blocked"))
        .await
        .wrap_err("create task")?;

    let advanced = tracker.advance_task(task.id()).await.wrap_err("advance")?;

    assert_eq!(advanced, task);
    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    assert_eq!(history.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_member_is_refused_by_assign_and_advance(tracker: Tracker) -> eyre::Result<()> {
    let member = add_member(&tracker, "Ada").await?;
    fill_in_progress(&tracker, &member, 5).await?;
    let waiting = tracker
        .create_task(CreateTaskRequest::new("Queued").with_assignee(member.id().to_string()))
        .await
        .wrap_err("create queued task")?;
    let unassigned = tracker
        .create_task(CreateTaskRequest::new("Loose"))
        .await
        .wrap_err("create loose task")?;

    let advance_error = tracker
        .advance_task(waiting.id())
        .await
        .expect_err("advance should be refused");
    let assign_error = tracker
        .assign_task(unassigned.id(), &member.id().to_string())
        .await
        .expect_err("assign should be refused");

    assert!(matches!(
        advance_error,
        TaskWorkflowError::CapacityExceeded { limit: 5, .. }
    ));
    assert_eq!(assign_error.kind(), ErrorKind::CapacityExceeded);
    let unchanged = tracker.get_task(waiting.id()).await.wrap_err("get")?;
    assert_eq!(unchanged.status(), TaskStatus::Todo);
    let still_loose = tracker.get_task(unassigned.id()).await.wrap_err("get")?;
    assert_eq!(still_loose.assignee_id(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_below_limit_can_be_assigned(tracker: Tracker) -> eyre::Result<()> {
    let member = add_member(&tracker, "Grace").await?;
    fill_in_progress(&tracker, &member, 4).await?;
    let task = tracker
        .create_task(CreateTaskRequest::new("One more"))
        .await
        .wrap_err("create task")?;

    let assigned = tracker
        .assign_task(task.id(), &member.id().to_string())
        .await
        .wrap_err("assign")?;

    assert_eq!(assigned.assignee_id(), Some(member.id()));
    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    let newest = history.first().ok_or_else(|| eyre::eyre!("missing entry"))?;
    assert_eq!(newest.details(), "Task assigned to member");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_not_subject_to_admission(tracker: Tracker) -> eyre::Result<()> {
    let member = add_member(&tracker, "Linus").await?;
    fill_in_progress(&tracker, &member, 5).await?;
    let task = tracker
        .create_task(CreateTaskRequest::new("Overflow"))
        .await
        .wrap_err("create task")?;

    let updated = tracker
        .update_task(
            task.id(),
            UpdateTaskRequest::new()
                .with_status("in_progress")
                .with_assignee(member.id().to_string()),
        )
        .await
        .wrap_err("update")?;

    assert_eq!(updated.status(), TaskStatus::InProgress);
    let count = tracker
        .workflow()
        .admission()
        .count_in_progress(Some(member.id()))
        .await
        .wrap_err("count")?;
    assert_eq!(count, 6);
    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    let newest = history.first().ok_or_else(|| eyre::eyre!("missing entry"))?;
    assert_eq!(newest.action(), HistoryAction::Update);
    assert_eq!(
        newest.details(),
        "Status changed from todo to in_progress, Assignee changed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_untracked_changes_records_nothing(tracker: Tracker) -> eyre::Result<()> {
    let task = tracker
        .create_task(CreateTaskRequest::new("Docs"))
        .await
        .wrap_err("create task")?;

    let updated = tracker
        .update_task(
            task.id(),
            UpdateTaskRequest::new()
                .with_description("Expanded notes")
                .with_tags(["docs".to_owned()]),
        )
        .await
        .wrap_err("update")?;

    assert_eq!(updated.description(), Some("Expanded notes"));
    assert!(updated.tags().contains("docs"));
    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    assert_eq!(history.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_unknown_task_are_not_found(tracker: Tracker) -> eyre::Result<()> {
    let member = add_member(&tracker, "Barbara").await?;
    let missing = TaskId::new();

    let get_error = tracker.get_task(missing).await.expect_err("get should fail");
    let update_error = tracker
        .update_task(missing, UpdateTaskRequest::new().with_title("Nope"))
        .await
        .expect_err("update should fail");
    let advance_error = tracker
        .advance_task(missing)
        .await
        .expect_err("advance should fail");
    let assign_error = tracker
        .assign_task(missing, &member.id().to_string())
        .await
        .expect_err("assign should fail");

    for error in [get_error, update_error, advance_error, assign_error] {
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
    Ok(())
}

#[rstest]
#[case("")]
#[case("not-a-member-id")]
#[tokio::test(flavor = "multi_thread")]
async fn assign_rejects_malformed_member(tracker: Tracker, #[case] assignee: &str) -> eyre::Result<()> {
    let task = tracker
        .create_task(CreateTaskRequest::new("Pick me"))
        .await
        .wrap_err("create task")?;

    let error = tracker
        .assign_task(task.id(), assignee)
        .await
        .expect_err("assign should fail");

    assert!(matches!(error, TaskWorkflowError::InvalidAssignee(_)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_keeps_history_and_is_idempotent(tracker: Tracker) -> eyre::Result<()> {
    let task = tracker
        .create_task(CreateTaskRequest::new("Short lived"))
        .await
        .wrap_err("create task")?;

    tracker.delete_task(task.id()).await.wrap_err("delete")?;
    tracker.delete_task(task.id()).await.wrap_err("delete again")?;

    let error = tracker.get_task(task.id()).await.expect_err("task is gone");
    assert_eq!(error.kind(), ErrorKind::NotFound);
    let history = tracker.task_history(task.id()).await.wrap_err("history")?;
    assert_eq!(history.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_scopes_tasks_to_a_project(tracker: Tracker) -> eyre::Result<()> {
    let web = tracker
        .create_project(CreateProjectRequest::new("Website", "web"))
        .await
        .wrap_err("create project")?;
    let api = tracker
        .create_project(CreateProjectRequest::new("API", "api"))
        .await
        .wrap_err("create project")?;
    let landing = tracker
        .create_task(CreateTaskRequest::new("Landing page").with_project(web.id()))
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Rate limits").with_project(api.id()))
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Unscoped"))
        .await
        .wrap_err("create task")?;

    let scoped = tracker
        .list_tasks(&TaskFilter::new().with_project(web.id()))
        .await
        .wrap_err("list")?;
    let everything = tracker.list_tasks(&TaskFilter::new()).await.wrap_err("list")?;

    assert_eq!(scoped, vec![landing]);
    assert_eq!(everything.len(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_invalid_fields(tracker: Tracker) {
    let blank = tracker
        .create_task(CreateTaskRequest::new("   "))
        .await
        .expect_err("blank title should fail");
    let bad_status = tracker
        .create_task(CreateTaskRequest::new("Task").with_status("archived"))
        .await
        .expect_err("unknown status should fail");
    let bad_priority = tracker
        .create_task(CreateTaskRequest::new("Task").with_priority("urgent"))
        .await
        .expect_err("unknown priority should fail");

    for error in [blank, bad_status, bad_priority] {
        assert_eq!(error.kind(), ErrorKind::Validation);
    }
}
