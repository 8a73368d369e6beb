//! HTML board, form post, and download tests.

use super::helpers::{TestApp, app, body_text};
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use calamine::{Reader, Xlsx};
use eyre::ensure;
use rstest::rstest;
use std::io::Cursor;
use workboard::task::{
    adapters::spreadsheet::TASKS_SHEET,
    domain::{TaskFilter, TaskStatus},
    services::CreateTaskRequest,
};

fn is_redirect_home(response: &axum::response::Response) -> bool {
    response.status() == StatusCode::SEE_OTHER
        && response
            .headers()
            .get(header::LOCATION)
            .is_some_and(|location| location == "/")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_board_renders(app: TestApp) -> eyre::Result<()> {
    let (status, page) = app.get_text("/").await?;

    ensure!(status == StatusCode::OK);
    ensure!(page.contains("No open tasks."));
    ensure!(page.contains("<option value=\"PROJECT\">"));
    ensure!(page.contains("Backlog: 0% open"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_form_creates_and_redirects(app: TestApp) -> eyre::Result<()> {
    let response = app
        .post_form("/", "action=add&title=Unload+truck+12&assignee=Alice&category=PROJECT")
        .await?;
    ensure!(is_redirect_home(&response));

    let (_, page) = app.get_text("/").await?;
    ensure!(page.contains("Unload truck 12"));
    ensure!(page.contains("<b>Alice</b>"));
    ensure!(page.contains("Backlog: 100% open"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_rerenders_with_message(app: TestApp) -> eyre::Result<()> {
    let response = app.post_form("/", "action=add&title=+++&assignee=Alice").await?;

    ensure!(response.status() == StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(response).await?;
    ensure!(page.contains("task title must not be empty"));
    ensure!(app.state.lifecycle().list(&TaskFilter::all()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_form_completes_every_selected_task(app: TestApp) -> eyre::Result<()> {
    let lifecycle = app.state.lifecycle();
    let first = lifecycle.create(CreateTaskRequest::new("Unload")).await?;
    let second = lifecycle.create(CreateTaskRequest::new("Count")).await?;
    let kept = lifecycle.create(CreateTaskRequest::new("Sweep")).await?;

    let response = app
        .post_form("/", &format!("action=done&ids={}&ids={}", first.id(), second.id()))
        .await?;
    ensure!(is_redirect_home(&response));

    let open = lifecycle
        .list(&TaskFilter::all().with_status(TaskStatus::Open))
        .await?;
    ensure!(open == [kept]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_form_reports_unknown_ids(app: TestApp) -> eyre::Result<()> {
    let task = app
        .state
        .lifecycle()
        .create(CreateTaskRequest::new("Unload"))
        .await?;

    let response = app
        .post_form("/delete", &format!("ids={}&ids=404", task.id()))
        .await?;

    ensure!(response.status() == StatusCode::NOT_FOUND);
    let page = body_text(response).await?;
    ensure!(page.contains("task not found: 404"));
    ensure!(app.state.lifecycle().list(&TaskFilter::all()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_action_is_rejected(app: TestApp) -> eyre::Result<()> {
    let response = app.post_form("/", "action=archive").await?;

    ensure!(response.status() == StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_downloads_a_workbook(app: TestApp) -> eyre::Result<()> {
    app.state
        .lifecycle()
        .create(CreateTaskRequest::new("Unload").with_assignee("Alice"))
        .await?;
    app.state
        .lifecycle()
        .create(CreateTaskRequest::new("Count"))
        .await?;

    let request = Request::builder().uri("/export").body(Body::empty())?;
    let response = app.send(request).await?;
    ensure!(response.status() == StatusCode::OK);
    ensure!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("task_export.xlsx"))
    );

    let bytes = to_bytes(response.into_body(), super::helpers::BODY_LIMIT).await?;
    let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    ensure!(workbook.worksheet_range(TASKS_SHEET)?.rows().count() == 3);
    Ok(())
}
