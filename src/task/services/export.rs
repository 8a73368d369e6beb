//! Service writing task snapshots and the activity journal to disk.

use crate::task::{
    domain::{Category, Task, TaskFilter},
    ports::{TaskActivityLog, TaskExportError, TaskExporter, TaskRepository, TaskRepositoryError},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for export operations.
#[derive(Debug, Error)]
pub enum TaskExportServiceError {
    /// Encoding or writing the artifact failed.
    #[error(transparent)]
    Export(#[from] TaskExportError),

    /// Loading the snapshot failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for export service operations.
pub type TaskExportServiceResult<T> = Result<T, TaskExportServiceError>;

/// Exports task snapshots and the activity journal as spreadsheets.
#[derive(Clone)]
pub struct TaskExportService<R, L, W>
where
    R: TaskRepository + ?Sized,
    L: TaskActivityLog + ?Sized,
    W: TaskExporter + ?Sized,
{
    repository: Arc<R>,
    activity: Arc<L>,
    exporter: Arc<W>,
    reported_categories: Vec<Category>,
}

impl<R, L, W> TaskExportService<R, L, W>
where
    R: TaskRepository + ?Sized,
    L: TaskActivityLog + ?Sized,
    W: TaskExporter + ?Sized + 'static,
{
    /// Creates an export service.
    ///
    /// `reported_categories` name the categories that get their own sheet in
    /// the activity workbook.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        activity: Arc<L>,
        exporter: Arc<W>,
        reported_categories: Vec<Category>,
    ) -> Self {
        Self {
            repository,
            activity,
            exporter,
            reported_categories,
        }
    }

    /// Encodes `tasks` as workbook bytes without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExportError::Encoding`] when the workbook cannot be
    /// built.
    pub async fn render_tasks(&self, tasks: Vec<Task>) -> TaskExportServiceResult<Vec<u8>> {
        let exporter = Arc::clone(&self.exporter);
        let bytes = tokio::task::spawn_blocking(move || exporter.encode_tasks(&tasks))
            .await
            .map_err(|err| TaskExportError::from(std::io::Error::other(err)))??;
        Ok(bytes)
    }

    /// Writes one row per task to `destination`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExportError::Io`] when the file cannot be written and
    /// [`TaskExportError::Encoding`] when the workbook cannot be built.
    pub async fn export_to_spreadsheet(
        &self,
        tasks: Vec<Task>,
        destination: &Utf8Path,
    ) -> TaskExportServiceResult<()> {
        let row_count = tasks.len();
        let bytes = self.render_tasks(tasks).await?;
        write_artifact(destination.to_owned(), bytes).await?;
        tracing::info!(path = %destination, rows = row_count, "task export written");
        Ok(())
    }

    /// Loads the tasks matching `filter` and exports them to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExportServiceError::Repository`] when loading fails, and
    /// the errors of [`Self::export_to_spreadsheet`] otherwise.
    pub async fn export_snapshot(
        &self,
        filter: &TaskFilter,
        destination: &Utf8Path,
    ) -> TaskExportServiceResult<()> {
        let tasks = self.repository.list(filter).await?;
        self.export_to_spreadsheet(tasks, destination).await
    }

    /// Writes the activity workbook to `destination`, replacing any existing
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskExportServiceError::Repository`] when the journal cannot
    /// be read and [`TaskExportServiceError::Export`] when encoding or
    /// writing fails.
    pub async fn export_activity_log(&self, destination: &Utf8Path) -> TaskExportServiceResult<()> {
        let entries = self.activity.entries().await?;
        let entry_count = entries.len();
        let exporter = Arc::clone(&self.exporter);
        let categories = self.reported_categories.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            exporter.encode_activity(&entries, &categories)
        })
        .await
        .map_err(|err| TaskExportError::from(std::io::Error::other(err)))??;
        write_artifact(destination.to_owned(), bytes).await?;
        tracing::info!(path = %destination, entries = entry_count, "activity log written");
        Ok(())
    }
}

/// Writes `bytes` to `destination` through a capability on its parent
/// directory.
async fn write_artifact(destination: Utf8PathBuf, bytes: Vec<u8>) -> Result<(), TaskExportError> {
    tokio::task::spawn_blocking(move || -> Result<(), TaskExportError> {
        let file_name = destination
            .file_name()
            .ok_or_else(|| TaskExportError::InvalidDestination(destination.to_string()))?;
        let parent = match destination.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        dir.write(file_name, &bytes)?;
        Ok(())
    })
    .await
    .map_err(|err| TaskExportError::from(std::io::Error::other(err)))?
}
