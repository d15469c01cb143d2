//! Query evaluation and vault scanning for markdown tasks.
//!
//! This crate evaluates [`filter::Query`] text against tasks recognized by
//! `mdtasks-core`, and collects those tasks from a directory of markdown
//! files with [`VaultScanner`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use mdtasks_core::models::Task;
use serde::{Deserialize, Serialize};

pub mod filter;
pub mod scan;

pub use scan::{ScanError, VaultScanner};

use filter::{FilterContext, Query};

/// Tasks collected from one scan of a vault.
///
/// The index lives only as long as the caller needs it; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskIndex {
    /// The directory that was scanned.
    pub root: PathBuf,

    /// Recognized tasks, ordered by file path then line number.
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Number of files read during the scan.
    #[serde(default)]
    pub files_scanned: usize,

    /// UTC timestamp when the scan finished.
    pub scanned_at: DateTime<Utc>,
}

impl TaskIndex {
    /// Creates an empty index for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tasks: Vec::new(),
            files_scanned: 0,
            scanned_at: Utc::now(),
        }
    }

    /// Returns true if no tasks were found.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks in the index.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Finds a task by its `path:line` identifier.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Returns the tasks matching a query.
    pub fn query(&self, query: &Query, context: &FilterContext) -> Vec<&Task> {
        query.filter_tasks(&self.tasks, context)
    }

    /// Returns tasks that are incomplete or in progress.
    pub fn open_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status.is_open()).collect()
    }
}
