//! Port for encoding task snapshots into spreadsheet workbooks.

use crate::task::domain::{Category, Task, TaskActivity};
use std::sync::Arc;
use thiserror::Error;

/// Column headers of the task export sheet, in order.
pub const TASK_EXPORT_COLUMNS: [&str; 7] = [
    "id",
    "title",
    "assignee",
    "category",
    "status",
    "created_at",
    "completed_at",
];

/// Result type for export operations.
pub type TaskExportResult<T> = Result<T, TaskExportError>;

/// Encodes tasks and journal entries into workbook bytes.
pub trait TaskExporter: Send + Sync {
    /// Encodes one sheet with a header row and one row per task, using the
    /// column order of [`TASK_EXPORT_COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskExportError::Encoding`] when the workbook cannot be
    /// assembled.
    fn encode_tasks(&self, tasks: &[Task]) -> TaskExportResult<Vec<u8>>;

    /// Encodes the activity journal: a combined log sheet plus one sheet per
    /// reported category and a catch-all sheet for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExportError::Encoding`] when the workbook cannot be
    /// assembled.
    fn encode_activity(
        &self,
        entries: &[TaskActivity],
        reported_categories: &[Category],
    ) -> TaskExportResult<Vec<u8>>;
}

/// Errors raised while producing export artifacts.
#[derive(Debug, Clone, Error)]
pub enum TaskExportError {
    /// Writing the artifact to disk failed.
    #[error("export write failed: {0}")]
    Io(Arc<std::io::Error>),

    /// The destination path has no file name component.
    #[error("invalid export destination: {0}")]
    InvalidDestination(String),

    /// Building the workbook failed.
    #[error("workbook encoding failed: {0}")]
    Encoding(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskExportError {
    /// Wraps a workbook encoding error.
    pub fn encoding(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Encoding(Arc::new(err))
    }
}

impl From<std::io::Error> for TaskExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
