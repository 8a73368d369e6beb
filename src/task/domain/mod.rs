//! Domain model for logistics task tracking.
//!
//! Tasks are created open, may be edited at any time, and move to completed
//! exactly once. All infrastructure concerns stay outside of this boundary.

mod activity;
mod error;
mod ids;
mod labels;
mod task;

pub use activity::{TaskAction, TaskActivity};
pub use error::{ParseTaskActionError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use labels::{Assignee, Category, TaskTitle};
pub use task::{NewTask, PersistedTaskData, Task, TaskEdit, TaskFilter, TaskStatus};
