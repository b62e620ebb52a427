//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::{
    domain::{Task, TaskStatus},
    services::TaskWorkflowError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world
        .task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing task"))?;

    let stored = run_async(world.tracker.get_task(task_id))
        .map_err(|err| eyre::eyre!("stored task lookup failed: {err}"))?;
    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the advance fails with a capacity exceeded error")]
fn advance_fails_with_capacity_exceeded(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_advance_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing advance result"))?;

    if !matches!(result, Err(TaskWorkflowError::CapacityExceeded { .. })) {
        return Err(eyre::eyre!("expected CapacityExceeded error, got {result:?}"));
    }
    Ok(())
}

#[then("the task history has {count:usize} entries")]
fn task_history_has_entries(world: &TaskWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let task_id = world
        .task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing task"))?;

    let history = run_async(world.tracker.task_history(task_id))
        .map_err(|err| eyre::eyre!("history lookup failed: {err}"))?;
    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            history.len()
        ));
    }
    Ok(())
}
