//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{member::services::CreateMemberRequest, task::services::CreateTaskRequest};

#[given(r#"a member named "{name}""#)]
fn member_named(world: &mut TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let member = run_async(world.tracker.create_member(CreateMemberRequest::new(name)))
        .wrap_err("create member for workflow scenario")?;
    world.member = Some(member);
    Ok(())
}

#[given("the member has {count:usize} in-progress tasks")]
fn member_has_in_progress_tasks(
    world: &mut TaskWorkflowWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let member_id = world
        .member
        .as_ref()
        .map(|member| member.id().to_string())
        .ok_or_else(|| eyre::eyre!("missing member in scenario world"))?;

    for index in 0..count {
        run_async(
            world.tracker.create_task(
                CreateTaskRequest::new(format!("Ongoing {index}"))
                    .with_status("in_progress")
                    .with_assignee(member_id.clone()),
            ),
        )
        .wrap_err("create in-progress task in scenario setup")?;
    }
    Ok(())
}

#[given(r#"a todo task "{title}" assigned to the member"#)]
fn todo_task_for_member(world: &mut TaskWorkflowWorld, title: String) -> Result<(), eyre::Report> {
    let member_id = world
        .member
        .as_ref()
        .map(|member| member.id().to_string())
        .ok_or_else(|| eyre::eyre!("missing member in scenario world"))?;

    let task = run_async(
        world
            .tracker
            .create_task(CreateTaskRequest::new(title).with_assignee(member_id)),
    )
    .wrap_err("create assigned task in scenario setup")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"a blocked task "{title}""#)]
fn blocked_task(world: &mut TaskWorkflowWorld, title: String) -> Result<(), eyre::Report> {
    let task = run_async(
        world
            .tracker
            .create_task(CreateTaskRequest::new(title).with_status("blocked")),
    )
    .wrap_err("create blocked task in scenario setup")?;
    world.task = Some(task);
    Ok(())
}
