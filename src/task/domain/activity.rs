//! Activity journal entries recorded for task mutations.

use super::{Assignee, Category, ParseTaskActionError, Task, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Kind of mutation recorded in the activity journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// The task was created.
    Create,
    /// The task was marked completed.
    Complete,
    /// The task was deleted.
    Delete,
}

impl TaskAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Complete => "complete",
            Self::Delete => "delete",
        }
    }
}

impl TryFrom<&str> for TaskAction {
    type Error = ParseTaskActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "create" => Ok(Self::Create),
            "complete" => Ok(Self::Complete),
            "delete" => Ok(Self::Delete),
            _ => Err(ParseTaskActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journal entry: a snapshot of the task at the time of the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskActivity {
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
    /// What happened.
    pub action: TaskAction,
    /// Identifier of the affected task.
    pub task_id: TaskId,
    /// Task title at the time of the action.
    pub title: TaskTitle,
    /// Task assignee at the time of the action.
    pub assignee: Assignee,
    /// Task category at the time of the action.
    pub category: Category,
}

impl TaskActivity {
    /// Snapshots `task` for a journal entry.
    #[must_use]
    pub fn record(action: TaskAction, task: &Task, occurred_at: DateTime<Utc>) -> Self {
        Self {
            occurred_at,
            action,
            task_id: task.id(),
            title: task.title().clone(),
            assignee: task.assignee().clone(),
            category: task.category().clone(),
        }
    }
}
