//! HTML board handlers and their form posts.

use super::{
    error::WebError,
    state::{AppState, BOARD_TEMPLATE},
};
use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskStatus},
    services::{BatchReport, CreateTaskRequest, group_by_assignee},
};
use axum::{
    extract::{Form, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use serde::Serialize;
use std::sync::Arc;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const EXPORT_DISPOSITION: &str = "attachment; filename=\"task_export.xlsx\"";

#[derive(Debug, Serialize)]
struct BoardGroup {
    assignee: String,
    tasks: Vec<Task>,
}

/// Raw form fields in submission order. Checkbox lists repeat their key.
struct BoardForm {
    fields: Vec<(String, String)>,
}

impl BoardForm {
    fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map_or("", |(_, value)| value.as_str())
    }

    fn selected_ids(&self) -> (Vec<TaskId>, Vec<WebError>) {
        let mut ids = Vec::new();
        let mut failures = Vec::new();
        for (_, raw) in self.fields.iter().filter(|(name, _)| name == "ids") {
            match raw.trim().parse::<i64>() {
                Ok(id) => ids.push(TaskId::new(id)),
                Err(_) => failures.push(WebError::BadInput(format!("invalid task id: {raw}"))),
            }
        }
        (ids, failures)
    }
}

pub(super) async fn show(State(state): State<Arc<AppState>>) -> Result<Html<String>, WebError> {
    render_board(&state, &[]).await
}

pub(super) async fn submit(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = BoardForm { fields };
    let action = form.value("action").trim().to_ascii_lowercase();
    let failures = match action.as_str() {
        "add" => {
            let request = CreateTaskRequest::new(form.value("title"))
                .with_description(form.value("description"))
                .with_assignee(form.value("assignee"))
                .with_category(form.value("category"));
            match state.lifecycle().create(request).await {
                Ok(_) => Vec::new(),
                Err(err) => vec![WebError::from(err)],
            }
        }
        "done" => {
            let (ids, mut failures) = form.selected_ids();
            failures.extend(report_failures(state.lifecycle().complete_many(&ids).await));
            failures
        }
        other => vec![WebError::BadInput(format!("unknown action: {other}"))],
    };
    finish(&state, failures).await
}

pub(super) async fn delete(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let (ids, mut failures) = BoardForm { fields }.selected_ids();
    failures.extend(report_failures(state.lifecycle().delete_many(&ids).await));
    finish(&state, failures).await
}

pub(super) async fn download(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let tasks = state.lifecycle().list(&TaskFilter::all()).await?;
    let bytes = state.export().render_tasks(tasks).await?;
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, EXPORT_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

fn report_failures(report: BatchReport) -> impl Iterator<Item = WebError> {
    report
        .failed
        .into_iter()
        .map(|(_, err)| WebError::from(err))
}

/// Redirects back to the board, or re-renders it with the failures and the
/// status of the first one.
async fn finish(state: &AppState, failures: Vec<WebError>) -> Response {
    let Some(first) = failures.first() else {
        return Redirect::to("/").into_response();
    };
    let status = first.status();
    let messages: Vec<String> = failures.iter().map(ToString::to_string).collect();
    match render_board(state, &messages).await {
        Ok(page) => (status, page).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn render_board(state: &AppState, errors: &[String]) -> Result<Html<String>, WebError> {
    let open = state
        .lifecycle()
        .list(&TaskFilter::all().with_status(TaskStatus::Open))
        .await?;
    let backlog_ratio = state.query().backlog_ratio().await?;
    let groups: Vec<BoardGroup> = group_by_assignee(open)
        .into_iter()
        .map(|(assignee, tasks)| BoardGroup { assignee, tasks })
        .collect();
    let template = state.templates().get_template(BOARD_TEMPLATE)?;
    let page = template.render(context! {
        groups,
        backlog_ratio,
        categories => state.reported_categories(),
        errors,
    })?;
    Ok(Html(page))
}
