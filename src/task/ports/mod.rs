//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod activity;
pub mod export;
pub mod repository;

pub use activity::TaskActivityLog;
pub use export::{TASK_EXPORT_COLUMNS, TaskExportError, TaskExportResult, TaskExporter};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
