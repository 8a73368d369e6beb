//! `.xlsx` workbook encoding for task exports and the activity journal.

use crate::task::{
    domain::{Category, Task, TaskActivity, TaskId},
    ports::{TASK_EXPORT_COLUMNS, TaskExportError, TaskExportResult, TaskExporter},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

/// Name of the single sheet in a task export.
pub const TASKS_SHEET: &str = "Tasks";

/// Name of the combined sheet in the activity workbook.
pub const ACTIVITY_LOG_SHEET: &str = "Tasks_Log";

/// Column headers of the combined activity sheet.
pub const ACTIVITY_COLUMNS: [&str; 6] = [
    "timestamp",
    "action",
    "task_id",
    "title",
    "assignee",
    "category",
];

/// Column headers of the per-category activity sheets.
pub const ACTIVITY_CATEGORY_COLUMNS: [&str; 5] =
    ["timestamp", "action", "task_id", "title", "assignee"];

/// Longest worksheet name a workbook accepts, in characters.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Workbook encoder backed by `rust_xlsxwriter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxTaskExporter;

impl XlsxTaskExporter {
    /// Creates an encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Formats a timestamp the way every export cell carries it.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl TaskExporter for XlsxTaskExporter {
    fn encode_tasks(&self, tasks: &[Task]) -> TaskExportResult<Vec<u8>> {
        build_tasks_workbook(tasks).map_err(TaskExportError::encoding)
    }

    fn encode_activity(
        &self,
        entries: &[TaskActivity],
        reported_categories: &[Category],
    ) -> TaskExportResult<Vec<u8>> {
        build_activity_workbook(entries, reported_categories).map_err(TaskExportError::encoding)
    }
}

fn build_tasks_workbook(tasks: &[Task]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(TASKS_SHEET)?;
    write_header(sheet, &TASK_EXPORT_COLUMNS, &header)?;

    for (row, task) in (1_u32..).zip(tasks) {
        write_id(sheet, row, 0, task.id())?;
        sheet.write_string(row, 1, task.title().as_str())?;
        sheet.write_string(row, 2, task.assignee().as_str())?;
        sheet.write_string(row, 3, task.category().as_str())?;
        sheet.write_string(row, 4, task.status().label())?;
        sheet.write_string(row, 5, format_timestamp(task.created_at()))?;
        if let Some(completed_at) = task.completed_at() {
            sheet.write_string(row, 6, format_timestamp(completed_at))?;
        }
    }

    workbook.save_to_buffer()
}

fn build_activity_workbook(
    entries: &[TaskActivity],
    reported_categories: &[Category],
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let combined = workbook.add_worksheet();
    combined.set_name(ACTIVITY_LOG_SHEET)?;
    write_header(combined, &ACTIVITY_COLUMNS, &header)?;
    for (row, entry) in (1_u32..).zip(entries) {
        write_activity_row(combined, row, entry)?;
        combined.write_string(row, 5, entry.category.as_str())?;
    }

    for target in category_sheets(reported_categories) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(target.name.as_str())?;
        write_header(sheet, &ACTIVITY_CATEGORY_COLUMNS, &header)?;
        let matching = entries
            .iter()
            .filter(|entry| sheet_for(&entry.category, reported_categories) == target.category);
        for (row, entry) in (1_u32..).zip(matching) {
            write_activity_row(sheet, row, entry)?;
        }
    }

    workbook.save_to_buffer()
}

/// A per-category sheet: the category whose entries it holds and the
/// worksheet name it is written under.
struct CategorySheet {
    category: Category,
    name: String,
}

/// Returns the per-category sheets in order: each distinct reported
/// category, then the catch-all. Names are unique ignoring case, including
/// against the combined sheet.
fn category_sheets(reported_categories: &[Category]) -> Vec<CategorySheet> {
    let mut taken = vec![ACTIVITY_LOG_SHEET.to_lowercase()];
    let mut sheets: Vec<CategorySheet> = Vec::with_capacity(reported_categories.len() + 1);
    for category in reported_categories
        .iter()
        .chain(std::iter::once(&Category::uncategorized()))
    {
        if sheets.iter().any(|sheet| &sheet.category == category) {
            continue;
        }
        let name = unique_sheet_name(&sheet_name_for(category), &taken);
        taken.push(name.to_lowercase());
        sheets.push(CategorySheet {
            category: category.clone(),
            name,
        });
    }
    sheets
}

/// Maps a category label onto a legal worksheet name: forbidden characters
/// become `_`, the name is cut to [`MAX_SHEET_NAME_CHARS`] and may not start
/// or end with an apostrophe.
fn sheet_name_for(category: &Category) -> String {
    let cleaned: String = category
        .as_str()
        .chars()
        .map(|ch| {
            if FORBIDDEN_SHEET_NAME_CHARS.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let trimmed = cleaned.trim_matches('\'');
    // "History" is reserved.
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("history") {
        format!("{trimmed}_")
    } else {
        trimmed.to_owned()
    }
}

fn unique_sheet_name(base: &str, taken: &[String]) -> String {
    let is_free = |candidate: &str| !taken.contains(&candidate.to_lowercase());
    if is_free(base) {
        return base.to_owned();
    }
    let mut counter = 2_usize;
    loop {
        let suffix = format!("_{counter}");
        let keep = MAX_SHEET_NAME_CHARS.saturating_sub(suffix.len());
        let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
        if is_free(&candidate) {
            return candidate;
        }
        counter = counter.saturating_add(1);
    }
}

fn sheet_for(category: &Category, reported_categories: &[Category]) -> Category {
    if reported_categories.contains(category) {
        category.clone()
    } else {
        Category::uncategorized()
    }
}

fn write_header(sheet: &mut Worksheet, columns: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, name) in (0_u16..).zip(columns) {
        sheet.write_string_with_format(0, col, *name, format)?;
    }
    Ok(())
}

fn write_activity_row(
    sheet: &mut Worksheet,
    row: u32,
    entry: &TaskActivity,
) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, format_timestamp(entry.occurred_at))?;
    sheet.write_string(row, 1, entry.action.as_str())?;
    write_id(sheet, row, 2, entry.task_id)?;
    sheet.write_string(row, 3, entry.title.as_str())?;
    sheet.write_string(row, 4, entry.assignee.as_str())?;
    Ok(())
}

/// Writes ids as numbers while they fit losslessly, as text beyond that.
fn write_id(sheet: &mut Worksheet, row: u32, col: u16, id: TaskId) -> Result<(), XlsxError> {
    match i32::try_from(id.value()) {
        Ok(small) => sheet.write_number(row, col, small)?,
        Err(_) => sheet.write_string(row, col, id.to_string())?,
    };
    Ok(())
}
