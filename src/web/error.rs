//! HTTP error mapping.

use crate::task::{
    ports::TaskRepositoryError,
    services::{TaskExportServiceError, TaskLifecycleError},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// A lifecycle operation failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),

    /// Reading the store failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Producing an export failed.
    #[error(transparent)]
    Export(#[from] TaskExportServiceError),

    /// The request carried a value that cannot be interpreted.
    #[error("{0}")]
    BadInput(String),

    /// Rendering the board failed.
    #[error("failed to render page: {0}")]
    Template(#[from] minijinja::Error),
}

impl WebError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Lifecycle(err) => lifecycle_status(err),
            Self::Repository(TaskRepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::BadInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repository(_) | Self::Export(_) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Maps lifecycle failures: bad input 422, unknown id 404, disallowed
/// transition 409, storage 500.
const fn lifecycle_status(err: &TaskLifecycleError) -> StatusCode {
    match err {
        TaskLifecycleError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TaskLifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
        TaskLifecycleError::InvalidState(_) => StatusCode::CONFLICT,
        TaskLifecycleError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
