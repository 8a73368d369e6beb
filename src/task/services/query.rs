//! Read-only views over the task store: groupings, counts, backlog ratio.

use crate::task::{
    domain::{Task, TaskFilter, TaskStatus},
    ports::{TaskRepository, TaskRepositoryResult},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Tasks keyed by a grouping label, labels in ascending order and tasks in
/// creation order within each group.
pub type TaskGroups = BTreeMap<String, Vec<Task>>;

/// Open and completed task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Number of open tasks.
    pub open: usize,
    /// Number of completed tasks.
    pub completed: usize,
}

impl StatusCounts {
    /// Tallies the statuses of `tasks`.
    #[must_use]
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks
            .into_iter()
            .fold(Self::default(), |mut counts, task| {
                match task.status() {
                    TaskStatus::Open => counts.open += 1,
                    TaskStatus::Completed => counts.completed += 1,
                }
                counts
            })
    }

    /// Returns the total number of tasks.
    #[must_use]
    pub const fn total(self) -> usize {
        self.open + self.completed
    }

    /// Returns the fraction of tasks still open.
    ///
    /// An empty store has a backlog ratio of `0.0`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "task counts stay far below 2^52 and the ratio is a reporting metric"
    )]
    pub fn backlog_ratio(self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.open as f64 / total as f64
    }
}

/// Counts, backlog ratio, and category groups taken from one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    /// Open and completed counts.
    #[serde(flatten)]
    pub counts: StatusCounts,
    /// Number of tasks in the store.
    pub total: usize,
    /// Share of tasks still open.
    pub backlog_ratio: f64,
    /// Every task grouped by category.
    pub by_category: TaskGroups,
}

impl TaskSummary {
    /// Summarizes `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let counts = StatusCounts::tally(&tasks);
        Self {
            counts,
            total: counts.total(),
            backlog_ratio: counts.backlog_ratio(),
            by_category: group_by_category(tasks),
        }
    }
}

/// Groups tasks by assignee label.
#[must_use]
pub fn group_by_assignee(tasks: Vec<Task>) -> TaskGroups {
    group_by(tasks, |task| task.assignee().as_str())
}

/// Groups tasks by category label.
#[must_use]
pub fn group_by_category(tasks: Vec<Task>) -> TaskGroups {
    group_by(tasks, |task| task.category().as_str())
}

fn group_by(tasks: Vec<Task>, key: impl Fn(&Task) -> &str) -> TaskGroups {
    let mut groups = TaskGroups::new();
    for task in tasks {
        let label = key(&task).to_owned();
        groups.entry(label).or_default().push(task);
    }
    groups
}

/// Query service deriving grouped views from the task store.
#[derive(Clone)]
pub struct TaskQueryService<R>
where
    R: TaskRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> TaskQueryService<R>
where
    R: TaskRepository + ?Sized,
{
    /// Creates a query service over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every task grouped by assignee.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the listing fails.
    pub async fn group_by_assignee(&self) -> TaskRepositoryResult<TaskGroups> {
        Ok(group_by_assignee(self.repository.list(&TaskFilter::all()).await?))
    }

    /// Returns every task grouped by category.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the listing fails.
    pub async fn group_by_category(&self) -> TaskRepositoryResult<TaskGroups> {
        Ok(group_by_category(self.repository.list(&TaskFilter::all()).await?))
    }

    /// Returns open and completed counts across the store.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the listing fails.
    pub async fn status_counts(&self) -> TaskRepositoryResult<StatusCounts> {
        let tasks = self.repository.list(&TaskFilter::all()).await?;
        Ok(StatusCounts::tally(&tasks))
    }

    /// Returns counts, backlog ratio, and category groups from a single
    /// listing, so the figures agree with each other.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the listing fails.
    pub async fn summary(&self) -> TaskRepositoryResult<TaskSummary> {
        let tasks = self.repository.list(&TaskFilter::all()).await?;
        Ok(TaskSummary::from_tasks(tasks))
    }

    /// Returns `count(open) / count(all)`, or `0.0` for an empty store.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the listing fails.
    pub async fn backlog_ratio(&self) -> TaskRepositoryResult<f64> {
        Ok(self.status_counts().await?.backlog_ratio())
    }
}
