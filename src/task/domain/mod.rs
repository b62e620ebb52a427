//! Domain model for the task workflow engine.
//!
//! Tasks reference members and projects by identifier only. Neither reference
//! is checked on write; dangling references are resolved at read time.

mod changes;
mod error;
mod filter;
mod ids;
mod status;
mod task;
mod values;

pub use changes::{AssigneeChange, TaskChanges, describe_changes};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::TaskId;
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft};
pub use values::{TaskTags, TaskTitle};
