//! JSON API tests.

use super::helpers::{TestApp, app};
use axum::http::StatusCode;
use eyre::{OptionExt, ensure};
use rstest::rstest;
use serde_json::{Value, json};

async fn create(app: &TestApp, body: Value) -> eyre::Result<i64> {
    let (status, task) = app.json("POST", "/api/tasks", Some(body)).await?;
    ensure!(status == StatusCode::CREATED, "create returned {status}: {task}");
    task.get("id").and_then(Value::as_i64).ok_or_eyre("created task has no id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_get_complete_delete(app: TestApp) -> eyre::Result<()> {
    let id = create(
        &app,
        json!({ "title": " Unload truck 12 ", "assignee": "Alice", "category": "receiving" }),
    )
    .await?;

    let (status, task) = app.json("GET", &format!("/api/tasks/{id}"), None).await?;
    ensure!(status == StatusCode::OK);
    ensure!(task["title"] == "Unload truck 12");
    ensure!(task["category"] == "RECEIVING");
    ensure!(task["status"] == "open");
    ensure!(task["completed_at"].is_null());

    let (status, done) = app
        .json("POST", &format!("/api/tasks/{id}/complete"), None)
        .await?;
    ensure!(status == StatusCode::OK);
    ensure!(done["status"] == "completed");
    ensure!(done["completed_at"].is_string());

    let (status, _) = app
        .json("POST", &format!("/api/tasks/{id}/complete"), None)
        .await?;
    ensure!(status == StatusCode::CONFLICT);

    let (status, body) = app.json("DELETE", &format!("/api/tasks/{id}"), None).await?;
    ensure!(status == StatusCode::NO_CONTENT);
    ensure!(body.is_null());

    let (status, error) = app.json("GET", &format!("/api/tasks/{id}"), None).await?;
    ensure!(status == StatusCode::NOT_FOUND);
    ensure!(error["error"].is_string());
    Ok(())
}

#[rstest]
#[case::blank_title(json!({ "title": "   " }))]
#[case::empty_title(json!({ "title": "", "assignee": "Bob" }))]
#[tokio::test(flavor = "multi_thread")]
async fn blank_titles_are_unprocessable(app: TestApp, #[case] body: Value) -> eyre::Result<()> {
    let (status, error) = app.json("POST", "/api/tasks", Some(body)).await?;

    ensure!(status == StatusCode::UNPROCESSABLE_ENTITY);
    ensure!(error["error"].as_str().is_some_and(|message| message.contains("title")));
    let (_, listed) = app.json("GET", "/api/tasks", None).await?;
    ensure!(listed.as_array().is_some_and(Vec::is_empty));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_query(app: TestApp) -> eyre::Result<()> {
    create(&app, json!({ "title": "Label pallets", "assignee": "Alice", "category": "Project" }))
        .await?;
    let done = create(&app, json!({ "title": "Cycle count", "assignee": "Bob", "category": "Project" }))
        .await?;
    create(&app, json!({ "title": "Sweep dock" })).await?;
    app.json("POST", &format!("/api/tasks/{done}/complete"), None)
        .await?;

    let (_, open_projects) = app
        .json("GET", "/api/tasks?status=open&category=project", None)
        .await?;
    let titles: Vec<&str> = open_projects
        .as_array()
        .ok_or_eyre("list should be an array")?
        .iter()
        .filter_map(|task| task["title"].as_str())
        .collect();
    ensure!(titles == ["Label pallets"]);

    let (status, _) = app.json("GET", "/api/tasks?status=archived", None).await?;
    ensure!(status == StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_edits_selected_fields(app: TestApp) -> eyre::Result<()> {
    let id = create(&app, json!({ "title": "Label pallets", "assignee": "Alice" })).await?;

    let (status, task) = app
        .json(
            "PATCH",
            &format!("/api/tasks/{id}"),
            Some(json!({ "assignee": "  ", "category": "project" })),
        )
        .await?;

    ensure!(status == StatusCode::OK);
    ensure!(task["assignee"] == "Unassigned");
    ensure!(task["category"] == "PROJECT");
    ensure!(task["title"] == "Label pallets");

    let (status, _) = app
        .json("PATCH", "/api/tasks/999", Some(json!({ "title": "x" })))
        .await?;
    ensure!(status == StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_reports_backlog(app: TestApp) -> eyre::Result<()> {
    let (_, empty) = app.json("GET", "/api/summary", None).await?;
    ensure!(empty["backlog_ratio"] == 0.0);
    ensure!(empty["open"] == 0);

    let done = create(&app, json!({ "title": "Unload", "category": "Project" })).await?;
    create(&app, json!({ "title": "Count", "category": "Project" })).await?;
    app.json("POST", &format!("/api/tasks/{done}/complete"), None)
        .await?;

    let (status, summary) = app.json("GET", "/api/summary", None).await?;
    ensure!(status == StatusCode::OK);
    ensure!(summary["open"] == 1);
    ensure!(summary["completed"] == 1);
    ensure!(summary["total"] == 2);
    ensure!(summary["backlog_ratio"] == 0.5);
    ensure!(summary["by_category"]["PROJECT"].as_array().map(Vec::len) == Some(2));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_is_ok(app: TestApp) -> eyre::Result<()> {
    let (status, body) = app.json("GET", "/health", None).await?;
    ensure!(status == StatusCode::OK);
    ensure!(body["status"] == "ok");
    Ok(())
}
