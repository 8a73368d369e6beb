//! `SQLite` activity journal.

use super::{
    TaskSqlitePool,
    models::{ActivityRow, NewActivityRow},
    run_blocking,
    schema::task_activity,
};
use crate::task::{
    domain::{Assignee, Category, TaskAction, TaskActivity, TaskId, TaskTitle},
    ports::{TaskActivityLog, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `SQLite`-backed activity journal.
#[derive(Debug, Clone)]
pub struct SqliteTaskActivityLog {
    pool: TaskSqlitePool,
}

impl SqliteTaskActivityLog {
    /// Creates a journal over a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskActivityLog for SqliteTaskActivityLog {
    async fn append(&self, entry: &TaskActivity) -> TaskRepositoryResult<()> {
        let pending = entry.clone();
        run_blocking(&self.pool, move |connection| {
            let row = NewActivityRow {
                occurred_at: pending.occurred_at.naive_utc(),
                action: pending.action.as_str(),
                task_id: pending.task_id.value(),
                title: pending.title.as_str(),
                assignee: pending.assignee.as_str(),
                category: pending.category.as_str(),
            };
            diesel::insert_into(task_activity::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn entries(&self) -> TaskRepositoryResult<Vec<TaskActivity>> {
        run_blocking(&self.pool, move |connection| {
            let rows = task_activity::table
                .select(ActivityRow::as_select())
                .order(task_activity::id.asc())
                .load::<ActivityRow>(connection)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn row_to_entry(row: ActivityRow) -> TaskRepositoryResult<TaskActivity> {
    Ok(TaskActivity {
        occurred_at: row.occurred_at.and_utc(),
        action: TaskAction::try_from(row.action.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        task_id: TaskId::new(row.task_id),
        title: TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?,
        assignee: Assignee::new(row.assignee),
        category: Category::new(row.category),
    })
}
