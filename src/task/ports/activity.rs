//! Port for the append-only task activity journal.

use super::TaskRepositoryResult;
use crate::task::domain::TaskActivity;
use async_trait::async_trait;

/// Append-only journal of task mutations.
#[async_trait]
pub trait TaskActivityLog: Send + Sync {
    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::Persistence`] when the journal
    /// cannot be written.
    async fn append(&self, entry: &TaskActivity) -> TaskRepositoryResult<()>;

    /// Returns every entry in the order it was appended.
    async fn entries(&self) -> TaskRepositoryResult<Vec<TaskActivity>>;
}
