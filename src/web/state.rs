//! Shared handler state.

use crate::task::{
    adapters::spreadsheet::XlsxTaskExporter,
    domain::Category,
    ports::{TaskActivityLog, TaskRepository},
    services::{TaskExportService, TaskLifecycleService, TaskQueryService},
};
use minijinja::Environment;
use mockable::DefaultClock;
use std::sync::Arc;

/// Lifecycle service over the shared store and journal.
pub type LifecycleService =
    TaskLifecycleService<dyn TaskRepository, dyn TaskActivityLog, DefaultClock>;

/// Query service over the shared store.
pub type QueryService = TaskQueryService<dyn TaskRepository>;

/// Export service writing `.xlsx` workbooks.
pub type ExportService = TaskExportService<dyn TaskRepository, dyn TaskActivityLog, XlsxTaskExporter>;

pub(super) const BOARD_TEMPLATE: &str = "board.html";

/// Services and templates shared by every request handler.
pub struct AppState {
    lifecycle: LifecycleService,
    query: QueryService,
    export: Arc<ExportService>,
    reported_categories: Vec<Category>,
    templates: Environment<'static>,
}

impl AppState {
    /// Wires the services over one store and journal.
    ///
    /// # Errors
    ///
    /// Returns the template error when the board template fails to parse.
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        activity: Arc<dyn TaskActivityLog>,
        reported_categories: Vec<Category>,
    ) -> Result<Self, minijinja::Error> {
        let mut templates = Environment::new();
        templates.add_template(BOARD_TEMPLATE, include_str!("templates/board.html"))?;
        Ok(Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&repository),
                Arc::clone(&activity),
                Arc::new(DefaultClock),
            ),
            query: TaskQueryService::new(Arc::clone(&repository)),
            export: Arc::new(TaskExportService::new(
                repository,
                activity,
                Arc::new(XlsxTaskExporter::new()),
                reported_categories.clone(),
            )),
            reported_categories,
            templates,
        })
    }

    /// Returns the lifecycle service.
    #[must_use]
    pub const fn lifecycle(&self) -> &LifecycleService {
        &self.lifecycle
    }

    /// Returns the query service.
    #[must_use]
    pub const fn query(&self) -> &QueryService {
        &self.query
    }

    /// Returns the export service, shared with the periodic exporter.
    #[must_use]
    pub const fn export(&self) -> &Arc<ExportService> {
        &self.export
    }

    /// Returns the categories offered on the board form.
    #[must_use]
    pub fn reported_categories(&self) -> &[Category] {
        &self.reported_categories
    }

    pub(super) const fn templates(&self) -> &Environment<'static> {
        &self.templates
    }
}
