//! Task aggregate root and related lifecycle types.

use super::{Assignee, Category, ParseTaskStatusError, TaskDomainError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is waiting to be done.
    Open,
    /// Task has been completed. Terminal.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
        }
    }

    /// Returns the upper-case label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Completed => "COMPLETED",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task that has been validated but not yet assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: String,
    assignee: Assignee,
    category: Category,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates an open task stamped with the clock's current time.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: impl Into<String>,
        assignee: Assignee,
        category: Category,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        Self {
            title,
            description: description.into().trim().to_owned(),
            assignee,
            category,
            created_at: clock.utc(),
        }
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &Assignee {
        &self.assignee
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Turns the pending task into a stored task with the given identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            assignee: self.assignee,
            category: self.category,
            status: TaskStatus::Open,
            created_at: self.created_at,
            completed_at: None,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    assignee: Assignee,
    category: Category,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted assignee label.
    pub assignee: Assignee,
    /// Persisted category label.
    pub category: Category,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validated field changes applied to an existing task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement assignee.
    pub assignee: Option<Assignee>,
    /// Replacement category.
    pub category: Option<Category>,
}

impl TaskEdit {
    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.category.is_none()
    }
}

impl Task {
    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InconsistentCompletion`] when the
    /// completion timestamp is present without a completed status (or the
    /// reverse), and [`TaskDomainError::CompletedBeforeCreated`] when the
    /// timestamps are out of order.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        match (data.status, data.completed_at) {
            (TaskStatus::Open, None) => {}
            (TaskStatus::Completed, Some(completed_at)) => {
                if completed_at < data.created_at {
                    return Err(TaskDomainError::CompletedBeforeCreated(data.id));
                }
            }
            _ => return Err(TaskDomainError::InconsistentCompletion(data.id)),
        }

        Ok(Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            category: data.category,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &Assignee {
        &self.assignee
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` while the task is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Marks the task completed at the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyCompleted`] if the task is already
    /// completed.
    pub fn complete(&mut self, clock: &(impl Clock + ?Sized)) -> Result<(), TaskDomainError> {
        self.complete_at(clock.utc())
    }

    /// Marks the task completed at `timestamp`.
    ///
    /// A timestamp earlier than the creation time is clamped to the creation
    /// time so that `created_at <= completed_at` always holds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyCompleted`] if the task is already
    /// completed.
    pub fn complete_at(&mut self, timestamp: DateTime<Utc>) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Completed {
            return Err(TaskDomainError::AlreadyCompleted(self.id));
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(timestamp.max(self.created_at));
        Ok(())
    }

    /// Applies field edits. Status and timestamps are never touched.
    pub fn apply_edit(&mut self, edit: TaskEdit) {
        let TaskEdit {
            title,
            description,
            assignee,
            category,
        } = edit;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description.trim().to_owned();
        }
        if let Some(new_assignee) = assignee {
            self.assignee = new_assignee;
        }
        if let Some(new_category) = category {
            self.category = new_category;
        }
    }
}

/// Conjunctive filter for task listings. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Only tasks with this assignee.
    pub assignee: Option<Assignee>,
    /// Only tasks in this category.
    pub category: Option<Category>,
}

impl TaskFilter {
    /// Returns a filter matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to a status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to an assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restricts the filter to a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns `true` when `task` satisfies every set field.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self
                .assignee
                .as_ref()
                .is_none_or(|assignee| task.assignee() == assignee)
            && self
                .category
                .as_ref()
                .is_none_or(|category| task.category() == category)
    }
}
