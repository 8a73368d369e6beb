//! Shared fixtures for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use workboard::task::{
    adapters::{
        memory::{InMemoryTaskActivityLog, InMemoryTaskRepository},
        spreadsheet::XlsxTaskExporter,
    },
    domain::Category,
    services::{CreateTaskRequest, TaskExportService, TaskLifecycleService, TaskQueryService},
};

/// Lifecycle service over in-memory adapters.
pub type LifecycleService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryTaskActivityLog, DefaultClock>;

/// Export service over in-memory adapters.
pub type ExportService =
    TaskExportService<InMemoryTaskRepository, InMemoryTaskActivityLog, XlsxTaskExporter>;

/// Services sharing one in-memory store and journal.
pub struct Services {
    /// Lifecycle operations.
    pub lifecycle: LifecycleService,
    /// Grouped views.
    pub query: TaskQueryService<InMemoryTaskRepository>,
    /// Spreadsheet exports.
    pub export: ExportService,
    /// The shared journal.
    pub activity: Arc<InMemoryTaskActivityLog>,
}

/// Provides services over a fresh store, reporting the `PROJECT` category.
#[fixture]
pub fn services() -> Services {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let activity = Arc::new(InMemoryTaskActivityLog::new());
    Services {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::clone(&activity),
            Arc::new(DefaultClock),
        ),
        query: TaskQueryService::new(Arc::clone(&repository)),
        export: TaskExportService::new(
            repository,
            Arc::clone(&activity),
            Arc::new(XlsxTaskExporter::new()),
            vec![Category::new("PROJECT")],
        ),
        activity,
    }
}

/// Builds a create request with assignee and category.
#[must_use]
pub fn request(title: &str, assignee: &str, category: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(title)
        .with_assignee(assignee)
        .with_category(category)
}
