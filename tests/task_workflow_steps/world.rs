//! Shared world state for task workflow BDD scenarios.

use rstest::fixture;
use taskboard::{
    member::domain::Member,
    task::{domain::Task, services::TaskWorkflowError},
    tracker::Tracker,
};

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub tracker: Tracker,
    pub member: Option<Member>,
    pub task: Option<Task>,
    pub last_advance_result: Option<Result<Task, TaskWorkflowError>>,
}

impl TaskWorkflowWorld {
    /// Creates a world over fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: Tracker::in_memory(),
            member: None,
            task: None,
            last_advance_result: None,
        }
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
