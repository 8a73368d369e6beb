//! `SQLite` journal tests.

use super::helpers::{journal, new_task};
use eyre::ensure;
use rstest::rstest;
use workboard::task::{
    adapters::sqlite::SqliteTaskActivityLog,
    domain::{TaskAction, TaskActivity, TaskId},
    ports::TaskActivityLog,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entries_come_back_in_append_order(journal: SqliteTaskActivityLog) -> eyre::Result<()> {
    let task = new_task("Label pallets", "Alice", "Project").into_task(TaskId::new(5));
    let created = TaskActivity::record(TaskAction::Create, &task, task.created_at());
    let completed = TaskActivity::record(TaskAction::Complete, &task, task.created_at());

    journal.append(&created).await?;
    journal.append(&completed).await?;

    let entries = journal.entries().await?;
    ensure!(entries == vec![created, completed]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_journal_has_no_entries(journal: SqliteTaskActivityLog) -> eyre::Result<()> {
    ensure!(journal.entries().await?.is_empty());
    Ok(())
}
