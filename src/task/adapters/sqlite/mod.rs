//! `SQLite` adapters for task persistence and the activity journal.
//!
//! Both adapters share one r2d2 pool. Diesel calls are blocking, so every
//! operation runs on the tokio blocking thread pool.

mod activity;
mod models;
mod repository;
mod schema;

pub use activity::SqliteTaskActivityLog;
pub use repository::SqliteTaskRepository;

use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use thiserror::Error;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// SQL creating the `tasks` table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000000_create_tasks/up.sql");

/// SQL creating the `task_activity` table.
pub const CREATE_TASK_ACTIVITY_SQL: &str =
    include_str!("../../../../migrations/2026-10-19-000001_create_task_activity/up.sql");

/// Errors raised while opening the task database.
#[derive(Debug, Error)]
pub enum SqliteSetupError {
    /// The connection pool could not be built or a connection acquired.
    #[error("failed to open task database: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Applying the schema failed.
    #[error("failed to apply task schema: {0}")]
    Migration(#[from] diesel::result::Error),
}

#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Returns `true` for database URLs that name a private in-memory database.
fn is_in_memory(database_url: &str) -> bool {
    database_url == ":memory:" || database_url.contains("mode=memory")
}

/// Opens a pool for `database_url` and applies the task schema.
///
/// An in-memory database lives only as long as its connection, so such
/// pools hold exactly one connection that is never recycled.
///
/// # Errors
///
/// Returns [`SqliteSetupError`] when the database cannot be opened or the
/// schema cannot be applied.
pub fn connect(database_url: &str) -> Result<TaskSqlitePool, SqliteSetupError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let mut builder = TaskSqlitePool::builder().connection_customizer(Box::new(SqlitePragmas));
    if is_in_memory(database_url) {
        builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    }
    let pool = builder.build(manager)?;
    let mut connection = pool.get()?;
    apply_migrations(&mut connection)?;
    Ok(pool)
}

/// Applies every schema migration. Each script is idempotent.
///
/// # Errors
///
/// Returns the Diesel error raised by the first failing statement.
pub fn apply_migrations(connection: &mut SqliteConnection) -> Result<(), diesel::result::Error> {
    connection.batch_execute(CREATE_TASKS_SQL)?;
    connection.batch_execute(CREATE_TASK_ACTIVITY_SQL)?;
    Ok(())
}

/// Runs a blocking Diesel closure on a pooled connection.
async fn run_blocking<F, T>(pool: &TaskSqlitePool, f: F) -> TaskRepositoryResult<T>
where
    F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(TaskRepositoryError::persistence)?
}
