//! Shared test helpers for in-memory tracker integration tests.

use eyre::WrapErr;
use rstest::fixture;
use taskboard::{
    member::{domain::Member, services::CreateMemberRequest},
    task::{domain::Task, services::CreateTaskRequest},
    tracker::Tracker,
};

/// Provides a tracker over fresh in-memory stores.
#[fixture]
pub fn tracker() -> Tracker {
    Tracker::in_memory()
}

/// Registers a member with the given name.
///
/// # Errors
///
/// Returns an error if the member cannot be created.
pub async fn add_member(tracker: &Tracker, name: &str) -> eyre::Result<Member> {
    tracker
        .create_member(CreateMemberRequest::new(name))
        .await
        .wrap_err_with(|| format!("create member {name}"))
}

/// Creates `count` in-progress tasks assigned to `member`.
///
/// Creation skips admission, so this can fill a member to any level.
///
/// # Errors
///
/// Returns an error if any task cannot be created.
pub async fn fill_in_progress(
    tracker: &Tracker,
    member: &Member,
    count: usize,
) -> eyre::Result<Vec<Task>> {
    let mut created = Vec::with_capacity(count);
    for index in 0..count {
        let task = tracker
            .create_task(
                CreateTaskRequest::new(format!("Busy work {index}"))
                    .with_status("in_progress")
                    .with_assignee(member.id().to_string()),
            )
            .await
            .wrap_err("create in-progress task")?;
        created.push(task);
    }
    Ok(created)
}
