//! Output formatting utilities for the mdt CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules:
//!
//! - [`tasks`] - Task output formatting (list, show)
//! - [`explain`] - Parsed query trees (explain)
//! - [`helpers`] - Common formatting utilities (truncation, status, priority, due dates)

mod explain;
pub mod helpers;
mod tasks;

pub use explain::{format_explain_json, format_explain_table};
pub use tasks::{
    format_task_details_json, format_task_details_table, format_tasks_json, format_tasks_table,
};
