//! Diesel row models for task persistence.

use super::schema::{task_activity, tasks};
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Assignee label.
    pub assignee: String,
    /// Category label.
    pub category: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
    /// Completion timestamp (UTC, naive).
    pub completed_at: Option<NaiveDateTime>,
}

/// Insert model for task records. The identifier is assigned by `SQLite`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow<'a> {
    /// Task title.
    pub title: &'a str,
    /// Task description.
    pub description: &'a str,
    /// Assignee label.
    pub assignee: &'a str,
    /// Category label.
    pub category: &'a str,
    /// Lifecycle status.
    pub status: &'a str,
    /// Creation timestamp (UTC, naive).
    pub created_at: NaiveDateTime,
    /// Completion timestamp (UTC, naive).
    pub completed_at: Option<NaiveDateTime>,
}

/// Query result row for journal entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_activity)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ActivityRow {
    /// When the action happened (UTC, naive).
    pub occurred_at: NaiveDateTime,
    /// Action name.
    pub action: String,
    /// Affected task identifier.
    pub task_id: i64,
    /// Task title snapshot.
    pub title: String,
    /// Assignee snapshot.
    pub assignee: String,
    /// Category snapshot.
    pub category: String,
}

/// Insert model for journal entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_activity)]
pub struct NewActivityRow<'a> {
    /// When the action happened (UTC, naive).
    pub occurred_at: NaiveDateTime,
    /// Action name.
    pub action: &'a str,
    /// Affected task identifier.
    pub task_id: i64,
    /// Task title snapshot.
    pub title: &'a str,
    /// Assignee snapshot.
    pub assignee: &'a str,
    /// Category snapshot.
    pub category: &'a str,
}
