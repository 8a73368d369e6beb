//! JSON API handlers.

use super::{error::WebError, state::AppState};
use crate::task::{
    domain::{Assignee, Category, Task, TaskFilter, TaskId, TaskStatus},
    services::{CreateTaskRequest, EditTaskRequest, TaskSummary},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ListParams {
    status: Option<String>,
    assignee: Option<String>,
    category: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> Result<TaskFilter, WebError> {
        let mut filter = TaskFilter::all();
        if let Some(raw) = self.status {
            let status = TaskStatus::try_from(raw.as_str())
                .map_err(|err| WebError::BadInput(err.to_string()))?;
            filter = filter.with_status(status);
        }
        if let Some(assignee) = self.assignee {
            filter = filter.with_assignee(Assignee::new(assignee));
        }
        if let Some(category) = self.category {
            filter = filter.with_category(Category::new(category));
        }
        Ok(filter)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateTaskBody {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    assignee: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct EditTaskBody {
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    category: Option<String>,
}

impl From<EditTaskBody> for EditTaskRequest {
    fn from(body: EditTaskBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(assignee) = body.assignee {
            request = request.with_assignee(assignee);
        }
        if let Some(category) = body.category {
            request = request.with_category(category);
        }
        request
    }
}

pub(super) async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, WebError> {
    let filter = params.into_filter()?;
    Ok(Json(state.lifecycle().list(&filter).await?))
}

pub(super) async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<Task>), WebError> {
    let request = CreateTaskRequest::new(body.title)
        .with_description(body.description)
        .with_assignee(body.assignee)
        .with_category(body.category);
    let task = state.lifecycle().create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(super) async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, WebError> {
    Ok(Json(state.lifecycle().get(TaskId::new(id)).await?))
}

pub(super) async fn edit_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<EditTaskBody>,
) -> Result<Json<Task>, WebError> {
    let task = state
        .lifecycle()
        .edit(TaskId::new(id), EditTaskRequest::from(body))
        .await?;
    Ok(Json(task))
}

pub(super) async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, WebError> {
    state.lifecycle().delete(TaskId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn complete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, WebError> {
    Ok(Json(state.lifecycle().complete(TaskId::new(id)).await?))
}

pub(super) async fn summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TaskSummary>, WebError> {
    Ok(Json(state.query().summary().await?))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
