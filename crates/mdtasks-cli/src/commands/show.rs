//! Show command implementation.
//!
//! Displays detailed information about a single task.

use mdtasks_core::models::Task;
use mdtasks_vault::TaskIndex;

use super::{CommandContext, CommandError, Result};
use crate::output::{format_task_details_json, format_task_details_table};

/// Options for the show command.
#[derive(Debug)]
pub struct ShowOptions {
    /// Task ID (`path:line`).
    pub task_id: String,
}

/// Executes the show command.
///
/// # Errors
///
/// Returns [`CommandError::NotFound`] if no task has the given ID.
pub fn execute(ctx: &CommandContext, opts: &ShowOptions, index: &TaskIndex) -> Result<()> {
    let task = find_task(index, &opts.task_id)?;

    if ctx.json_output {
        let output = format_task_details_json(task)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_task_details_table(task, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Looks up a task, accepting `./` prefixes and backslash separators.
fn find_task<'a>(index: &'a TaskIndex, id: &str) -> Result<&'a Task> {
    let normalized = id.trim().replace('\\', "/");
    let normalized = normalized.strip_prefix("./").unwrap_or(&normalized);

    index
        .find(normalized)
        .ok_or_else(|| CommandError::NotFound { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtasks_core::recognize::recognize_document;

    fn index() -> TaskIndex {
        let mut index = TaskIndex::new("/vault");
        index.tasks = recognize_document("intro\n- [ ] first\n- [x] second", "notes/today.md");
        index
    }

    #[test]
    fn test_find_task_exact() {
        let index = index();
        let task = find_task(&index, "notes/today.md:2").unwrap();
        assert_eq!(task.description, "second");
    }

    #[test]
    fn test_find_task_normalizes_id() {
        let index = index();
        assert!(find_task(&index, "./notes/today.md:1").is_ok());
        assert!(find_task(&index, "notes\\today.md:1").is_ok());
        assert!(find_task(&index, " notes/today.md:1 ").is_ok());
    }

    #[test]
    fn test_find_task_not_found() {
        let index = index();
        let err = find_task(&index, "notes/today.md:0").unwrap_err();
        assert!(matches!(err, CommandError::NotFound { ref id } if id == "notes/today.md:0"));
    }
}
