//! In-memory adapters for tests and ephemeral runs.

mod activity;
mod task;

pub use activity::InMemoryTaskActivityLog;
pub use task::InMemoryTaskRepository;
