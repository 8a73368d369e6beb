//! Server bootstrap: open the store, wire the services, serve until
//! interrupted.

use crate::{
    config::AppConfig,
    scheduler::{ExportTargets, spawn_export_scheduler},
    task::{
        adapters::sqlite::{SqliteSetupError, SqliteTaskActivityLog, SqliteTaskRepository, connect},
        ports::{TaskActivityLog, TaskRepository},
    },
    web::{AppState, router},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

/// Errors that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The task database could not be opened.
    #[error(transparent)]
    Database(#[from] SqliteSetupError),

    /// The board template failed to load.
    #[error("failed to load templates: {0}")]
    Templates(#[from] minijinja::Error),

    /// Binding or serving the listener failed.
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds handler state over the `SQLite` store named by `config`.
///
/// # Errors
///
/// Returns [`StartupError::Database`] when the database cannot be opened and
/// [`StartupError::Templates`] when the templates fail to parse.
pub fn build_state(config: &AppConfig) -> Result<Arc<AppState>, StartupError> {
    let pool = connect(&config.database_url)?;
    let repository: Arc<dyn TaskRepository> = Arc::new(SqliteTaskRepository::new(pool.clone()));
    let activity: Arc<dyn TaskActivityLog> = Arc::new(SqliteTaskActivityLog::new(pool));
    let state = AppState::new(repository, activity, config.reported_categories())?;
    Ok(Arc::new(state))
}

/// Runs the board server until Ctrl-C.
///
/// # Errors
///
/// Returns [`StartupError`] when setup fails or the listener errors.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&config)?;
    tracing::info!(database = %config.database_url, "task store opened");

    let scheduler = config.export_interval().map(|every| {
        spawn_export_scheduler(
            Arc::clone(state.export()),
            ExportTargets {
                snapshot: config.export_path.clone(),
                activity_log: config.activity_log_path.clone(),
            },
            every,
        )
    });

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(address = %listener.local_addr()?, "workboard listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }
    tracing::info!("workboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
