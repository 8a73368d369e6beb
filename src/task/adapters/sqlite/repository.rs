//! `SQLite` repository implementation for task storage.

use super::{
    TaskSqlitePool,
    models::{NewTaskRow, TaskRow},
    run_blocking,
    schema::tasks,
};
use crate::task::{
    domain::{
        Assignee, Category, NewTask, PersistedTaskData, Task, TaskEdit, TaskFilter, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let pending = task.clone();
        run_blocking(&self.pool, move |connection| {
            let row = NewTaskRow {
                title: pending.title().as_str(),
                description: pending.description(),
                assignee: pending.assignee().as_str(),
                category: pending.category().as_str(),
                status: TaskStatus::Open.as_str(),
                created_at: pending.created_at().naive_utc(),
                completed_at: None,
            };
            let stored = diesel::insert_into(tasks::table)
                .values(&row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)?;
            row_to_task(stored)
        })
        .await
    }

    async fn update(&self, id: TaskId, edit: TaskEdit) -> TaskRepositoryResult<Task> {
        run_blocking(&self.pool, move |connection| {
            connection.immediate_transaction(|tx| {
                let mut task = load_task(tx, id)?.ok_or(TaskRepositoryError::NotFound(id))?;
                task.apply_edit(edit);
                let stored = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                    .set((
                        tasks::title.eq(task.title().as_str()),
                        tasks::description.eq(task.description()),
                        tasks::assignee.eq(task.assignee().as_str()),
                        tasks::category.eq(task.category().as_str()),
                    ))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)?;
                row_to_task(stored)
            })
        })
        .await
    }

    async fn complete(
        &self,
        id: TaskId,
        completed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        run_blocking(&self.pool, move |connection| {
            connection.immediate_transaction(|tx| {
                let mut task = load_task(tx, id)?.ok_or(TaskRepositoryError::NotFound(id))?;
                task.complete_at(completed_at)
                    .map_err(TaskRepositoryError::Rejected)?;
                let stored = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                    .set((
                        tasks::status.eq(task.status().as_str()),
                        tasks::completed_at.eq(task.completed_at().map(|at| at.naive_utc())),
                    ))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)?;
                row_to_task(stored)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        run_blocking(&self.pool, move |connection| {
            connection.immediate_transaction(|tx| {
                let task = load_task(tx, id)?.ok_or(TaskRepositoryError::NotFound(id))?;
                diesel::delete(tasks::table.filter(tasks::id.eq(id.value()))).execute(tx)?;
                Ok(task)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        run_blocking(&self.pool, move |connection| load_task(connection, id)).await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        run_blocking(&self.pool, move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .into_boxed();
            if let Some(status) = criteria.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(assignee) = criteria.assignee {
                query = query.filter(tasks::assignee.eq(assignee.as_str().to_owned()));
            }
            if let Some(category) = criteria.category {
                query = query.filter(tasks::category.eq(category.as_str().to_owned()));
            }
            let rows = query.load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn load_task(connection: &mut SqliteConnection, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
    let row = tasks::table
        .filter(tasks::id.eq(id.value()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()?;
    row.map(row_to_task).transpose()
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        assignee,
        category,
        status,
        created_at,
        completed_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        assignee: Assignee::new(assignee),
        category: Category::new(category),
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at: created_at.and_utc(),
        completed_at: completed_at.map(|at| at.and_utc()),
    };
    Task::from_persisted(data).map_err(TaskRepositoryError::persistence)
}
