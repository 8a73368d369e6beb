//! Task services orchestrating domain logic and ports.

mod export;
mod lifecycle;
mod query;

pub use export::{TaskExportService, TaskExportServiceError, TaskExportServiceResult};
pub use lifecycle::{
    BatchReport, CreateTaskRequest, EditTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
pub use query::{
    StatusCounts, TaskGroups, TaskQueryService, TaskSummary, group_by_assignee,
    group_by_category,
};
