//! HTTP surface: the HTML board, its form posts, the spreadsheet download,
//! and a JSON API over the same services.
//!
//! Every handler shares one [`AppState`]; the store and journal behind it
//! are opened once at startup.

mod api;
mod board;
mod error;
mod state;

pub use error::WebError;
pub use state::{AppState, ExportService, LifecycleService, QueryService};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router with request tracing.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(board::show).post(board::submit))
        .route("/delete", post(board::delete))
        .route("/export", get(board::download))
        .route("/api/tasks", get(api::list_tasks).post(api::create_task))
        .route(
            "/api/tasks/{id}",
            get(api::get_task)
                .patch(api::edit_task)
                .delete(api::delete_task),
        )
        .route("/api/tasks/{id}/complete", post(api::complete_task))
        .route("/api/summary", get(api::summary))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
