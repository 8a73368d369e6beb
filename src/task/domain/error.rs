//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task has already been completed and cannot be completed again.
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),

    /// A persisted task has a completion timestamp that disagrees with its
    /// status.
    #[error("task {0} has a completion timestamp inconsistent with its status")]
    InconsistentCompletion(TaskId),

    /// A persisted task claims to have been completed before it was created.
    #[error("task {0} was completed before it was created")]
    CompletedBeforeCreated(TaskId),
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing journal actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task action: {0}")]
pub struct ParseTaskActionError(pub String);
