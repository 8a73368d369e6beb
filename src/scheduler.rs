//! Periodic export of the task snapshot and the activity workbook.

use crate::{task::domain::TaskFilter, web::ExportService};
use camino::Utf8PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Files refreshed on every export tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTargets {
    /// Destination of the full task snapshot.
    pub snapshot: Utf8PathBuf,
    /// Destination of the activity workbook.
    pub activity_log: Utf8PathBuf,
}

/// Spawns the export loop. The first export runs immediately.
///
/// Failures are logged and the loop keeps its schedule.
pub fn spawn_export_scheduler(
    export: Arc<ExportService>,
    targets: ExportTargets,
    every: Duration,
) -> JoinHandle<()> {
    tracing::info!(interval_secs = every.as_secs(), "export scheduler started");
    tokio::spawn(async move {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            run_export_cycle(&export, &targets).await;
        }
    })
}

/// Writes both artifacts once, logging rather than returning failures.
pub async fn run_export_cycle(export: &ExportService, targets: &ExportTargets) {
    if let Err(err) = export
        .export_snapshot(&TaskFilter::all(), &targets.snapshot)
        .await
    {
        tracing::error!(path = %targets.snapshot, error = %err, "task snapshot export failed");
    }
    if let Err(err) = export.export_activity_log(&targets.activity_log).await {
        tracing::error!(
            path = %targets.activity_log,
            error = %err,
            "activity log export failed"
        );
    }
}
