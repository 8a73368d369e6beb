//! Validated and normalized text values carried by a task.

use super::TaskDomainError;
use serde::Serialize;
use std::fmt;

/// Returns at most `max_chars` leading characters of `value`.
fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Longest title kept, in characters.
    pub const MAX_CHARS: usize = 120;

    /// Creates a title from raw input, trimming and truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when nothing remains after
    /// trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(truncate_chars(trimmed, Self::MAX_CHARS)))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Person or team responsible for a task.
///
/// Blank input maps to [`Assignee::UNASSIGNED`] so every task belongs to
/// exactly one assignee group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Assignee(String);

impl Assignee {
    /// Label used when no assignee was given.
    pub const UNASSIGNED: &'static str = "Unassigned";

    /// Longest assignee label kept, in characters.
    pub const MAX_CHARS: usize = 60;

    /// Creates a normalized assignee label.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Self::unassigned();
        }
        Self(truncate_chars(trimmed, Self::MAX_CHARS))
    }

    /// Returns the placeholder assignee.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(Self::UNASSIGNED.to_owned())
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Assignee {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl AsRef<str> for Assignee {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper-cased work category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Label used when no category was given.
    pub const UNCATEGORIZED: &'static str = "UNCATEGORIZED";

    /// Longest category label kept, in characters.
    pub const MAX_CHARS: usize = 60;

    /// Creates a normalized category label.
    ///
    /// Upper-casing can lengthen a label, so truncation runs afterwards.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Self::uncategorized();
        }
        Self(truncate_chars(&trimmed.to_uppercase(), Self::MAX_CHARS))
    }

    /// Returns the fallback category.
    #[must_use]
    pub fn uncategorized() -> Self {
        Self(Self::UNCATEGORIZED.to_owned())
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::uncategorized()
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
