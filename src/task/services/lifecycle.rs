//! Service layer for task creation, edits, completion, and deletion.

use crate::task::{
    domain::{
        Assignee, Category, NewTask, Task, TaskAction, TaskActivity, TaskDomainError, TaskEdit,
        TaskFilter, TaskId, TaskTitle,
    },
    ports::{TaskActivityLog, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    assignee: String,
    category: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            assignee: String::new(),
            category: String::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Sets the task category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Request payload for editing task fields. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    category: Option<String>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Replaces the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn into_edit(self) -> Result<TaskEdit, TaskDomainError> {
        Ok(TaskEdit {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            assignee: self.assignee.map(Assignee::new),
            category: self.category.map(Category::new),
        })
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Caller input was rejected.
    #[error("invalid task input: {0}")]
    Validation(TaskDomainError),

    /// No task has the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The requested transition is not allowed from the task's state.
    #[error("invalid task state: {0}")]
    InvalidState(TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskDomainError> for TaskLifecycleError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::EmptyTitle => Self::Validation(err),
            TaskDomainError::AlreadyCompleted(_) => Self::InvalidState(err),
            TaskDomainError::InconsistentCompletion(_)
            | TaskDomainError::CompletedBeforeCreated(_) => {
                Self::Repository(TaskRepositoryError::persistence(err))
            }
        }
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Rejected(domain) => Self::from(domain),
            TaskRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Per-identifier outcome of a batch operation.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Tasks the operation succeeded for, in request order.
    pub succeeded: Vec<Task>,
    /// Identifiers the operation failed for, with the reason.
    pub failed: Vec<(TaskId, TaskLifecycleError)>,
}

impl BatchReport {
    /// Returns `true` when every identifier succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn push(&mut self, id: TaskId, outcome: TaskLifecycleResult<Task>) {
        match outcome {
            Ok(task) => self.succeeded.push(task),
            Err(err) => self.failed.push((id, err)),
        }
    }
}

/// Task lifecycle orchestration service.
///
/// The store and journal handles are constructed once at startup and shared
/// by every caller.
#[derive(Clone)]
pub struct TaskLifecycleService<R, L, C>
where
    R: TaskRepository + ?Sized,
    L: TaskActivityLog + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    repository: Arc<R>,
    activity: Arc<L>,
    clock: Arc<C>,
}

impl<R, L, C> TaskLifecycleService<R, L, C>
where
    R: TaskRepository + ?Sized,
    L: TaskActivityLog + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, activity: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            repository,
            activity,
            clock,
        }
    }

    /// Creates a new open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the title is empty and
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let new_task = NewTask::new(
            TaskTitle::new(&request.title)?,
            request.description,
            Assignee::new(&request.assignee),
            Category::new(&request.category),
            &*self.clock,
        );
        let task = self.repository.insert(&new_task).await?;
        tracing::info!(task_id = %task.id(), assignee = %task.assignee(), "task created");
        self.journal(TaskAction::Create, &task).await;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no such task exists.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Lists tasks matching `filter` in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Applies field edits to a task in either state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for an empty replacement
    /// title and [`TaskLifecycleError::NotFound`] for an unknown task.
    pub async fn edit(&self, id: TaskId, request: EditTaskRequest) -> TaskLifecycleResult<Task> {
        let edit = request.into_edit()?;
        if edit.is_empty() {
            return self.get(id).await;
        }
        let task = self.repository.update(id, edit).await?;
        tracing::info!(task_id = %id, "task edited");
        Ok(task)
    }

    /// Marks an open task completed.
    ///
    /// Completing an already completed task is an error, not a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task and
    /// [`TaskLifecycleError::InvalidState`] when it is already completed.
    pub async fn complete(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.repository.complete(id, self.clock.utc()).await?;
        tracing::info!(task_id = %id, "task completed");
        self.journal(TaskAction::Complete, &task).await;
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.repository.delete(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        self.journal(TaskAction::Delete, &task).await;
        Ok(())
    }

    /// Completes each task in turn; one failure does not stop the rest.
    pub async fn complete_many(&self, ids: &[TaskId]) -> BatchReport {
        let mut report = BatchReport::default();
        for &id in ids {
            report.push(id, self.complete(id).await);
        }
        report
    }

    /// Deletes each task in turn; one failure does not stop the rest.
    pub async fn delete_many(&self, ids: &[TaskId]) -> BatchReport {
        let mut report = BatchReport::default();
        for &id in ids {
            let outcome = match self.repository.delete(id).await {
                Ok(task) => {
                    tracing::info!(task_id = %id, "task deleted");
                    self.journal(TaskAction::Delete, &task).await;
                    Ok(task)
                }
                Err(err) => Err(TaskLifecycleError::from(err)),
            };
            report.push(id, outcome);
        }
        report
    }

    /// Records a journal entry for a mutation that has already committed.
    ///
    /// The mutation stands even if the journal write fails; the failure is
    /// logged.
    async fn journal(&self, action: TaskAction, task: &Task) {
        let entry = TaskActivity::record(action, task, self.clock.utc());
        if let Err(err) = self.activity.append(&entry).await {
            tracing::error!(
                task_id = %task.id(),
                action = %action,
                error = %err,
                "failed to record task activity"
            );
        }
    }
}
