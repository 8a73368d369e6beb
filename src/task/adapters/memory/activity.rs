//! In-memory activity journal.

use crate::task::{
    domain::TaskActivity,
    ports::{TaskActivityLog, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory activity journal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskActivityLog {
    entries: Arc<RwLock<Vec<TaskActivity>>>,
}

impl InMemoryTaskActivityLog {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskActivityLog for InMemoryTaskActivityLog {
    async fn append(&self, entry: &TaskActivity) -> TaskRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn entries(&self) -> TaskRepositoryResult<Vec<TaskActivity>> {
        let entries = self.entries.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.clone())
    }
}
