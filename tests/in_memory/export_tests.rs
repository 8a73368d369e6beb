//! Export integration tests: workbooks written from the live store.

use super::helpers::{Services, request, services};
use calamine::{Data, Reader, Xlsx, open_workbook};
use camino::Utf8PathBuf;
use eyre::{OptionExt, ensure};
use rstest::rstest;
use tempfile::TempDir;
use workboard::task::{
    adapters::spreadsheet::{ACTIVITY_LOG_SHEET, TASKS_SHEET},
    domain::{TaskFilter, TaskStatus},
};

fn destination(dir: &TempDir, name: &str) -> eyre::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(dir.path().join(name))
        .map_err(|path| eyre::eyre!("non UTF-8 temporary path: {}", path.display()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshot_respects_the_filter(services: Services) -> eyre::Result<()> {
    let done = services
        .lifecycle
        .create(request("Unload truck 12", "Alice", "Project"))
        .await?;
    services
        .lifecycle
        .create(request("Check seals", "Bob", "Project"))
        .await?;
    services.lifecycle.complete(done.id()).await?;
    let dir = TempDir::new()?;
    let path = destination(&dir, "open.xlsx")?;

    services
        .export
        .export_snapshot(&TaskFilter::all().with_status(TaskStatus::Open), &path)
        .await?;

    let mut workbook: Xlsx<_> = open_workbook(&path)?;
    let range = workbook.worksheet_range(TASKS_SHEET)?;
    ensure!(range.rows().count() == 2);
    let row = range.rows().nth(1).ok_or_eyre("missing data row")?;
    ensure!(row.get(1) == Some(&Data::String("Check seals".to_owned())));
    ensure!(row.get(4) == Some(&Data::String("OPEN".to_owned())));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn journal_workbook_reflects_mutations(services: Services) -> eyre::Result<()> {
    let project = services
        .lifecycle
        .create(request("Label pallets", "Alice", "project"))
        .await?;
    let other = services
        .lifecycle
        .create(request("Sweep dock", "Bob", "Yard"))
        .await?;
    services.lifecycle.complete(project.id()).await?;
    services.lifecycle.delete(other.id()).await?;
    let dir = TempDir::new()?;
    let path = destination(&dir, "log.xlsx")?;

    services.export.export_activity_log(&path).await?;

    let mut workbook: Xlsx<_> = open_workbook(&path)?;
    ensure!(workbook.sheet_names() == [ACTIVITY_LOG_SHEET, "PROJECT", "UNCATEGORIZED"]);
    ensure!(workbook.worksheet_range(ACTIVITY_LOG_SHEET)?.rows().count() == 5);
    ensure!(workbook.worksheet_range("PROJECT")?.rows().count() == 3);
    ensure!(workbook.worksheet_range("UNCATEGORIZED")?.rows().count() == 3);
    Ok(())
}
