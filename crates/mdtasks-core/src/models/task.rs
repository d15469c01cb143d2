//! Task record extracted from a single markdown line.

use serde::{Deserialize, Serialize};

use super::{DateField, Priority, TaskStatus};

/// A task recognized in a markdown document.
///
/// Tasks are created fresh by the recognizer and never mutated afterwards.
/// Metadata markers stay embedded in `description`; `original_markdown` holds
/// the untouched source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// `{file_path}:{line_number}`.
    pub id: String,

    /// Trimmed text after the checkbox.
    pub description: String,

    /// Status derived from `status_symbol`.
    pub status: TaskStatus,

    /// The raw character found inside the checkbox.
    pub status_symbol: char,

    /// Source path as supplied by the caller.
    pub file_path: String,

    /// Zero-based line offset within the source document.
    pub line_number: usize,

    /// Tags in order of appearance, each including its leading `#`.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Due date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Scheduled date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,

    /// Start date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Created date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,

    /// Priority from the first priority marker in the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Unparsed recurrence rule text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,

    /// The source line exactly as it was read.
    pub original_markdown: String,
}

impl Task {
    /// Builds the identifier for a task at the given location.
    pub fn make_id(file_path: &str, line_number: usize) -> String {
        format!("{file_path}:{line_number}")
    }

    /// Returns the value of one of the four date fields.
    pub fn date(&self, field: DateField) -> Option<&str> {
        match field {
            DateField::Due => self.due_date.as_deref(),
            DateField::Scheduled => self.scheduled_date.as_deref(),
            DateField::Start => self.start_date.as_deref(),
            DateField::Created => self.created_date.as_deref(),
        }
    }

    /// Returns true if the task carries a recurrence rule.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}
