//! Shared fixtures for `SQLite` integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use workboard::task::{
    adapters::sqlite::{SqliteTaskActivityLog, SqliteTaskRepository, TaskSqlitePool, connect},
    domain::{Assignee, Category, NewTask, TaskTitle},
};

/// Provides a pool over a fresh in-memory database with the schema applied.
///
/// # Panics
///
/// Panics if the database cannot be opened.
#[fixture]
pub fn pool() -> TaskSqlitePool {
    connect(":memory:").expect("in-memory database should open")
}

/// Provides a repository over a fresh in-memory database.
#[fixture]
pub fn repository(pool: TaskSqlitePool) -> SqliteTaskRepository {
    SqliteTaskRepository::new(pool)
}

/// Provides a journal over a fresh in-memory database.
#[fixture]
pub fn journal(pool: TaskSqlitePool) -> SqliteTaskActivityLog {
    SqliteTaskActivityLog::new(pool)
}

/// Builds a validated new task stamped with the current time.
///
/// # Panics
///
/// Panics if `title` is blank.
#[must_use]
pub fn new_task(title: &str, assignee: &str, category: &str) -> NewTask {
    NewTask::new(
        TaskTitle::new(title).expect("valid title"),
        "",
        Assignee::new(assignee),
        Category::new(category),
        &DefaultClock,
    )
}
