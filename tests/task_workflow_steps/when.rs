//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::Task;

#[when("the task is advanced")]
fn advance_task(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let result = run_async(world.tracker.advance_task(task_id));
    if let Ok(ref advanced) = result {
        world.task = Some(advanced.clone());
    }
    world.last_advance_result = Some(result);
    Ok(())
}
