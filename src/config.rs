//! Command-line and environment configuration.

use crate::task::domain::Category;
use camino::Utf8PathBuf;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime configuration. Every flag can also be set through the named
/// environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "workboard", version, about = "Daily logistics task board")]
pub struct AppConfig {
    /// `SQLite` database path, or `:memory:` for a throwaway store.
    #[arg(long, env = "WORKBOARD_DATABASE_URL", default_value = "tasks.db")]
    pub database_url: String,

    /// Address the HTTP server listens on.
    #[arg(long, env = "WORKBOARD_BIND", default_value = "127.0.0.1:5050")]
    pub bind: SocketAddr,

    /// Destination of the periodic task snapshot.
    #[arg(long, env = "WORKBOARD_EXPORT_PATH", default_value = "task_export.xlsx")]
    pub export_path: Utf8PathBuf,

    /// Destination of the periodic activity workbook.
    #[arg(
        long,
        env = "WORKBOARD_ACTIVITY_LOG_PATH",
        default_value = "task_done_log.xlsx"
    )]
    pub activity_log_path: Utf8PathBuf,

    /// Seconds between periodic exports; `0` disables them.
    #[arg(long, env = "WORKBOARD_EXPORT_INTERVAL_SECS", default_value_t = 3600)]
    pub export_interval_secs: u64,

    /// Category with its own sheet in the activity workbook. Repeatable.
    #[arg(
        long = "reported-category",
        env = "WORKBOARD_REPORTED_CATEGORIES",
        value_delimiter = ',',
        default_values = ["MALE OPERATION", "PROJECT"]
    )]
    pub reported_categories: Vec<String>,

    /// `tracing` filter directives.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl AppConfig {
    /// Returns the periodic export interval, or `None` when disabled.
    #[must_use]
    pub const fn export_interval(&self) -> Option<Duration> {
        match self.export_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Returns the normalized reported categories.
    #[must_use]
    pub fn reported_categories(&self) -> Vec<Category> {
        self.reported_categories.iter().map(Category::new).collect()
    }
}
