//! Application services for the task workflow engine.

mod admission;
mod interchange;
mod statistics;
mod workflow;

pub use admission::{AdmissionController, MAX_IN_PROGRESS_PER_MEMBER};
pub use interchange::{CsvInterchangeService, ImportReport, InterchangeError, InterchangeResult};
pub use statistics::{AssigneeCount, BoardStatistics, BoardStatisticsError, BoardStatisticsService};
pub use workflow::{
    CreateTaskRequest, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
    UpdateTaskRequest,
};
