//! List command implementation.
//!
//! Lists tasks from a freshly scanned vault, optionally filtered by a query.

use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;

use mdtasks_core::models::{Task, TaskStatus};
use mdtasks_vault::filter::{FilterContext, Query};
use mdtasks_vault::TaskIndex;
use tracing::debug;

use super::{CommandContext, Result};
use crate::cli::SortField;
use crate::output::{format_tasks_json, format_tasks_table};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions {
    /// Query clauses given on the command line.
    pub query: Vec<String>,
    /// File holding additional query clauses.
    pub query_file: Option<PathBuf>,
    /// Include records whose status is `non_task`.
    pub include_non_tasks: bool,
    /// Sort field.
    pub sort: Option<SortField>,
    /// Reverse sort order.
    pub reverse: bool,
    /// Limit results.
    pub limit: usize,
    /// Show all tasks (no limit).
    pub all: bool,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the query file cannot be read or output fails to
/// serialize.
pub fn execute(ctx: &CommandContext, opts: &ListOptions, index: &TaskIndex) -> Result<()> {
    let query = Query::parse(&read_query_text(opts)?);
    debug!(clauses = query.clauses().len(), "parsed list query");

    let context = FilterContext::now();
    let tasks = filter_tasks(index, &query, &context, opts);
    let total = tasks.len();

    let tasks = sort_tasks(tasks, opts);
    let tasks = apply_limit(tasks, opts);

    if ctx.json_output {
        let output = format_tasks_json(&tasks, total)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_tasks_table(&tasks, total, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Joins command-line clauses and the query file into one query text.
fn read_query_text(opts: &ListOptions) -> Result<String> {
    let mut lines = opts.query.clone();
    if let Some(path) = &opts.query_file {
        lines.push(fs::read_to_string(path)?);
    }
    Ok(lines.join("\n"))
}

/// Applies the query and hides non-task records unless requested.
fn filter_tasks<'a>(
    index: &'a TaskIndex,
    query: &Query,
    context: &FilterContext,
    opts: &ListOptions,
) -> Vec<&'a Task> {
    index
        .query(query, context)
        .into_iter()
        .filter(|task| opts.include_non_tasks || task.status != TaskStatus::NonTask)
        .collect()
}

/// Sorts tasks based on the provided options.
///
/// Without a sort field tasks keep scan order (file path, then line).
fn sort_tasks<'a>(mut tasks: Vec<&'a Task>, opts: &ListOptions) -> Vec<&'a Task> {
    if let Some(sort_field) = opts.sort {
        match sort_field {
            SortField::Due => {
                tasks.sort_by(|a, b| missing_last(a.due_date.as_deref(), b.due_date.as_deref()));
            }
            SortField::Priority => {
                tasks.sort_by(|a, b| {
                    missing_last(a.priority.map(|p| p.rank()), b.priority.map(|p| p.rank()))
                });
            }
            SortField::Path => {
                tasks.sort_by(|a, b| {
                    a.file_path
                        .cmp(&b.file_path)
                        .then(a.line_number.cmp(&b.line_number))
                });
            }
            SortField::Status => {
                tasks.sort_by_key(|t| status_rank(t.status));
            }
        }
    }

    if opts.reverse {
        tasks.reverse();
    }

    tasks
}

/// Orders present values ascending, with missing values last.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// Open work first, then finished, then everything else.
fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::InProgress => 0,
        TaskStatus::Incomplete => 1,
        TaskStatus::Complete => 2,
        TaskStatus::Cancelled => 3,
        TaskStatus::NonTask => 4,
    }
}

/// Applies the limit to the tasks.
fn apply_limit<'a>(tasks: Vec<&'a Task>, opts: &ListOptions) -> Vec<&'a Task> {
    if opts.all {
        tasks
    } else {
        tasks.into_iter().take(opts.limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mdtasks_core::recognize::recognize_document;
    use tempfile::TempDir;

    const DOCUMENT: &str = "\
- [ ] water plants 📅 2025-05-03
- [x] file taxes 📅 2025-04-15 🔺
- [?] maybe learn rust
- [/] write report ⏫ 📅 2025-04-30
- [-] old plan 🔽
";

    fn opts() -> ListOptions {
        ListOptions {
            query: vec![],
            query_file: None,
            include_non_tasks: false,
            sort: None,
            reverse: false,
            limit: 50,
            all: false,
        }
    }

    fn index() -> TaskIndex {
        let mut index = TaskIndex::new("/vault");
        index.tasks = recognize_document(DOCUMENT, "home.md");
        index.files_scanned = 1;
        index
    }

    fn context() -> FilterContext {
        FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap())
    }

    fn lines(tasks: &[&Task]) -> Vec<usize> {
        tasks.iter().map(|t| t.line_number).collect()
    }

    #[test]
    fn test_non_tasks_hidden_by_default() {
        let index = index();
        let tasks = filter_tasks(&index, &Query::default(), &context(), &opts());
        assert_eq!(lines(&tasks), vec![0, 1, 3, 4]);

        let opts = ListOptions {
            include_non_tasks: true,
            ..opts()
        };
        let tasks = filter_tasks(&index, &Query::default(), &context(), &opts);
        assert_eq!(lines(&tasks), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_query_applied() {
        let index = index();
        let query = Query::parse("not done\nhas due date");
        let tasks = filter_tasks(&index, &query, &context(), &opts());
        assert_eq!(lines(&tasks), vec![0, 3]);
    }

    #[test]
    fn test_sort_by_due_missing_last() {
        let index = index();
        let tasks = filter_tasks(&index, &Query::default(), &context(), &opts());
        let opts = ListOptions {
            sort: Some(SortField::Due),
            ..opts()
        };
        assert_eq!(lines(&sort_tasks(tasks, &opts)), vec![1, 3, 0, 4]);
    }

    #[test]
    fn test_sort_by_priority() {
        let index = index();
        let tasks = filter_tasks(&index, &Query::default(), &context(), &opts());
        let opts = ListOptions {
            sort: Some(SortField::Priority),
            ..opts()
        };
        assert_eq!(lines(&sort_tasks(tasks, &opts)), vec![1, 3, 4, 0]);
    }

    #[test]
    fn test_sort_by_status_reversed() {
        let index = index();
        let tasks = filter_tasks(&index, &Query::default(), &context(), &opts());
        let opts = ListOptions {
            sort: Some(SortField::Status),
            reverse: true,
            ..opts()
        };
        assert_eq!(lines(&sort_tasks(tasks, &opts)), vec![4, 1, 0, 3]);
    }

    #[test]
    fn test_apply_limit() {
        let index = index();
        let tasks: Vec<&Task> = index.tasks.iter().collect();

        let limited = apply_limit(tasks.clone(), &ListOptions { limit: 2, ..opts() });
        assert_eq!(limited.len(), 2);

        let all = apply_limit(
            tasks,
            &ListOptions {
                limit: 2,
                all: true,
                ..opts()
            },
        );
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_read_query_text_joins_sources() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overdue.query");
        fs::write(&path, "# overdue\ndue before today\n").unwrap();

        let opts = ListOptions {
            query: vec!["not done".to_string()],
            query_file: Some(path),
            ..opts()
        };
        let query = Query::parse(&read_query_text(&opts).unwrap());
        assert_eq!(query.clauses().len(), 2);
    }

    #[test]
    fn test_read_query_text_missing_file() {
        let opts = ListOptions {
            query_file: Some(PathBuf::from("/nonexistent/mdt/query.txt")),
            ..opts()
        };
        assert!(read_query_text(&opts).is_err());
    }
}
