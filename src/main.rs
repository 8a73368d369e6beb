//! Workboard server binary.

use clap::Parser;
use workboard::{app, config::AppConfig, telemetry};

#[tokio::main]
async fn main() -> Result<(), app::StartupError> {
    let config = AppConfig::parse();
    telemetry::init(&config.log_filter);
    app::run(config).await.inspect_err(|err| {
        tracing::error!(error = %err, "workboard exited with an error");
    })
}
