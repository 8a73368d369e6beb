//! `SQLite` repository tests for storage, filtering, and transitions.

use super::helpers::{new_task, pool, repository};
use chrono::Duration;
use eyre::{OptionExt, ensure};
use rstest::rstest;
use tempfile::TempDir;
use workboard::task::{
    adapters::sqlite::{SqliteTaskRepository, TaskSqlitePool, connect},
    domain::{
        Assignee, Category, TaskDomainError, TaskEdit, TaskFilter, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_ids_and_round_trips(repository: SqliteTaskRepository) -> eyre::Result<()> {
    let first = repository
        .insert(&new_task("Unload truck 12", "Alice", "Receiving"))
        .await?;
    let second = repository
        .insert(&new_task("Check seals", "", ""))
        .await?;

    ensure!(second.id() > first.id());
    ensure!(first.status() == TaskStatus::Open);
    ensure!(second.assignee().as_str() == Assignee::UNASSIGNED);
    ensure!(second.category().as_str() == Category::UNCATEGORIZED);

    let found = repository
        .find_by_id(first.id())
        .await?
        .ok_or_eyre("inserted task should be found")?;
    ensure!(found == first);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_every_filter(repository: SqliteTaskRepository) -> eyre::Result<()> {
    let alice_project = repository
        .insert(&new_task("Label pallets", "Alice", "Project"))
        .await?;
    repository
        .insert(&new_task("Unload truck 12", "Alice", "Receiving"))
        .await?;
    let bob_project = repository
        .insert(&new_task("Cycle count", "Bob", "Project"))
        .await?;
    repository
        .complete(bob_project.id(), bob_project.created_at())
        .await?;

    let all = repository.list(&TaskFilter::all()).await?;
    let ids: Vec<TaskId> = all.iter().map(|task| task.id()).collect();
    ensure!(ids.windows(2).all(|pair| matches!(pair, [a, b] if a < b)), "creation order");
    ensure!(all.len() == 3);

    let filter = TaskFilter::all()
        .with_status(TaskStatus::Open)
        .with_category(Category::new("project"));
    let open_projects = repository.list(&filter).await?;
    ensure!(open_projects.iter().map(|task| task.id()).collect::<Vec<_>>() == [alice_project.id()]);

    let bob = repository
        .list(&TaskFilter::all().with_assignee(Assignee::new("Bob")))
        .await?;
    ensure!(bob.len() == 1);
    ensure!(bob.first().map(|task| task.status()) == Some(TaskStatus::Completed));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_is_recorded_once(repository: SqliteTaskRepository) -> eyre::Result<()> {
    let task = repository
        .insert(&new_task("Unload truck 12", "Alice", ""))
        .await?;
    let at = task.created_at() + Duration::minutes(5);

    let completed = repository.complete(task.id(), at).await?;
    let again = repository.complete(task.id(), at + Duration::minutes(1)).await;

    ensure!(completed.completed_at() == Some(at));
    ensure!(matches!(
        again,
        Err(TaskRepositoryError::Rejected(TaskDomainError::AlreadyCompleted(id))) if id == task.id()
    ));
    let stored = repository
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("completed task should remain")?;
    ensure!(stored.completed_at() == Some(at));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_rows_are_not_found(repository: SqliteTaskRepository) -> eyre::Result<()> {
    let missing = TaskId::new(41);

    ensure!(repository.find_by_id(missing).await?.is_none());
    ensure!(matches!(
        repository.delete(missing).await,
        Err(TaskRepositoryError::NotFound(id)) if id == missing
    ));
    ensure!(matches!(
        repository.complete(missing, chrono::Utc::now()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_edited_fields(repository: SqliteTaskRepository) -> eyre::Result<()> {
    let task = repository
        .insert(&new_task("Unload truck 12", "Alice", "Receiving"))
        .await?;
    let edit = TaskEdit {
        title: Some(TaskTitle::new("Unload truck 14")?),
        description: Some("Door 3".to_owned()),
        assignee: Some(Assignee::new("Bob")),
        category: Some(Category::new("project")),
    };

    let edited = repository.update(task.id(), edit).await?;
    let reloaded = repository
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("edited task should remain")?;

    ensure!(reloaded == edited);
    ensure!(reloaded.title().as_str() == "Unload truck 14");
    ensure!(reloaded.description() == "Door 3");
    ensure!(reloaded.assignee().as_str() == "Bob");
    ensure!(reloaded.category().as_str() == "PROJECT");
    ensure!(reloaded.status() == TaskStatus::Open);
    ensure!(reloaded.created_at() == task.created_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_after_completion_keeps_the_task_completed(
    repository: SqliteTaskRepository,
) -> eyre::Result<()> {
    let task = repository
        .insert(&new_task("Unload truck 12", "Alice", ""))
        .await?;
    let stale = repository
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("inserted task should be found")?;
    let at = task.created_at() + Duration::minutes(5);
    repository.complete(task.id(), at).await?;

    let edit = TaskEdit {
        description: Some("Seal number checked".to_owned()),
        ..TaskEdit::default()
    };
    let edited = repository.update(stale.id(), edit).await?;
    let reloaded = repository
        .find_by_id(task.id())
        .await?
        .ok_or_eyre("edited task should remain")?;

    ensure!(stale.status() == TaskStatus::Open);
    ensure!(edited == reloaded);
    ensure!(reloaded.status() == TaskStatus::Completed);
    ensure!(reloaded.completed_at() == Some(at));
    ensure!(reloaded.description() == "Seal number checked");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_id_is_not_found(repository: SqliteTaskRepository) -> eyre::Result<()> {
    let missing = TaskId::new(41);
    let edit = TaskEdit {
        assignee: Some(Assignee::new("Bob")),
        ..TaskEdit::default()
    };

    let result = repository.update(missing, edit).await;

    ensure!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == missing));
    ensure!(repository.list(&TaskFilter::all()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_the_removed_task(pool: TaskSqlitePool) -> eyre::Result<()> {
    let repository = SqliteTaskRepository::new(pool);
    let task = repository
        .insert(&new_task("Sweep dock", "Bob", "Yard"))
        .await?;

    let removed = repository.delete(task.id()).await?;

    ensure!(removed == task);
    ensure!(repository.list(&TaskFilter::all()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_survive_reopen_without_reuse() -> eyre::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("tasks.db");
    let url = path.to_str().ok_or_eyre("temporary path should be UTF-8")?;

    let first = {
        let repository = SqliteTaskRepository::new(connect(url)?);
        let task = repository
            .insert(&new_task("Unload truck 12", "Alice", ""))
            .await?;
        repository.delete(task.id()).await?;
        task
    };

    let reopened = SqliteTaskRepository::new(connect(url)?);
    let second = reopened
        .insert(&new_task("Unload truck 14", "Alice", ""))
        .await?;

    ensure!(second.id() > first.id());
    ensure!(reopened.find_by_id(first.id()).await?.is_none());
    Ok(())
}
