//! Board statistics tests through the tracker facade.

use super::helpers::{add_member, tracker};
use eyre::WrapErr;
use rstest::rstest;
use taskboard::{
    project::services::CreateProjectRequest,
    task::{
        domain::{TaskPriority, TaskStatus},
        services::CreateTaskRequest,
    },
    tracker::Tracker,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_board_reports_zeroes(tracker: Tracker) -> eyre::Result<()> {
    let stats = tracker.board_statistics(None).await.wrap_err("statistics")?;

    assert_eq!(stats.total, 0);
    assert_eq!(stats.completion_percent, 0);
    assert_eq!(stats.by_status.len(), TaskStatus::ALL.len());
    assert!(stats.by_status.iter().all(|(_, count)| *count == 0));
    assert!(stats.by_assignee.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignees_are_labelled_by_name_or_fallback(tracker: Tracker) -> eyre::Result<()> {
    let ada = add_member(&tracker, "Ada").await?;
    let gone = add_member(&tracker, "Departed").await?;
    tracker
        .create_task(
            CreateTaskRequest::new("Ship")
                .with_status("done")
                .with_priority("high")
                .with_assignee(ada.id().to_string()),
        )
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Build").with_status("in_progress"))
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Plan").with_assignee(gone.id().to_string()))
        .await
        .wrap_err("create task")?;
    tracker.delete_member(gone.id()).await.wrap_err("delete member")?;

    let stats = tracker.board_statistics(None).await.wrap_err("statistics")?;

    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completion_percent, 33);
    assert_eq!(stats.status_count(TaskStatus::Done), 1);
    assert_eq!(stats.status_count(TaskStatus::Blocked), 0);
    assert_eq!(stats.priority_count(TaskPriority::High), 1);
    assert_eq!(stats.priority_count(TaskPriority::Medium), 2);
    assert_eq!(stats.assignee_count("Ada"), 1);
    assert_eq!(stats.assignee_count("Unassigned"), 1);
    assert_eq!(stats.assignee_count("Unknown"), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_can_be_scoped_to_a_project(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker
        .create_project(CreateProjectRequest::new("Mobile", "mob"))
        .await
        .wrap_err("create project")?;
    tracker
        .create_task(
            CreateTaskRequest::new("Release build")
                .with_status("done")
                .with_project(project.id()),
        )
        .await
        .wrap_err("create task")?;
    tracker
        .create_task(CreateTaskRequest::new("Elsewhere"))
        .await
        .wrap_err("create task")?;

    let scoped = tracker
        .board_statistics(Some(project.id()))
        .await
        .wrap_err("statistics")?;

    assert_eq!(scoped.total, 1);
    assert_eq!(scoped.completion_percent, 100);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_with_the_same_name_are_reported_separately(
    tracker: Tracker,
) -> eyre::Result<()> {
    let first = add_member(&tracker, "Sam").await?;
    let second = add_member(&tracker, "Sam").await?;
    for (title, member) in [("One", &first), ("Two", &first), ("Three", &second)] {
        tracker
            .create_task(CreateTaskRequest::new(title).with_assignee(member.id().to_string()))
            .await
            .wrap_err("create task")?;
    }

    let stats = tracker.board_statistics(None).await.wrap_err("statistics")?;

    assert_eq!(stats.by_assignee.len(), 2);
    assert_eq!(stats.member_count(Some(first.id())), 2);
    assert_eq!(stats.member_count(Some(second.id())), 1);
    assert_eq!(stats.assignee_count("Sam"), 3);
    Ok(())
}
