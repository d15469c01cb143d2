//! Multi-line queries.

use mdtasks_core::models::Task;

use super::ast::Filter;
use super::evaluator::{FilterContext, FilterEvaluator};
use super::parser::FilterParser;

/// A query made of one clause per line.
///
/// Blank lines and lines starting with `#` are ignored. A task matches the
/// query only when it matches every clause; there is no OR across lines.
/// An empty query matches every task.
///
/// # Example
///
/// ```
/// use mdtasks_core::recognize::recognize_document;
/// use mdtasks_vault::filter::{FilterContext, Query};
///
/// let tasks = recognize_document(
///     "- [x] ship #work\n- [ ] plan #work\n- [x] nap #home",
///     "log.md",
/// );
/// let query = Query::parse("# finished work\ndone\nhas tag work");
///
/// let matched = query.filter_tasks(&tasks, &FilterContext::now());
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].id, "log.md:0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Filter>,
}

impl Query {
    /// Parses query text, one clause per line.
    pub fn parse(text: &str) -> Self {
        let clauses = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(FilterParser::parse)
            .collect();
        Self { clauses }
    }

    /// Returns the parsed clauses in line order.
    pub fn clauses(&self) -> &[Filter] {
        &self.clauses
    }

    /// Returns true if the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns true if the task satisfies every clause.
    pub fn matches(&self, task: &Task, context: &FilterContext) -> bool {
        self.clauses
            .iter()
            .all(|clause| FilterEvaluator::new(clause, context).matches(task))
    }

    /// Filters a slice of tasks, keeping their order.
    pub fn filter_tasks<'a>(&self, tasks: &'a [Task], context: &FilterContext) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task, context))
            .collect()
    }
}

/// Evaluates raw query text against a list of tasks.
pub fn evaluate_query<'a>(tasks: &'a [Task], query: &str, context: &FilterContext) -> Vec<&'a Task> {
    Query::parse(query).filter_tasks(tasks, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mdtasks_core::models::Priority;
    use mdtasks_core::recognize::recognize_document;

    fn context() -> FilterContext {
        FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap())
    }

    const DOCUMENT: &str = "\
# Mixed
- [ ] open work #work ⏫
- [x] finished work #work
- [x] finished home #home
- [/] drafting #work ⏫
- [-] dropped #work ⏫
- [ ] open low 🔽
- [?] question #work
";

    fn tasks() -> Vec<Task> {
        recognize_document(DOCUMENT, "mixed.md")
    }

    fn ids<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let query = Query::parse("\n# comment\n  done  \n\n   # indented comment\nno tags\n");
        assert_eq!(query.clauses().len(), 2);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let tasks = tasks();
        let query = Query::parse("  \n# only a comment\n");
        assert!(query.is_empty());
        assert_eq!(query.filter_tasks(&tasks, &context()).len(), tasks.len());
    }

    #[test]
    fn test_lines_are_intersected() {
        let tasks = tasks();
        let matched = evaluate_query(&tasks, "done\nhas tag work", &context());
        assert_eq!(ids(&matched), vec!["mixed.md:2"]);
    }

    #[test]
    fn test_not_done_and_high_priority() {
        let tasks = tasks();
        let matched = evaluate_query(&tasks, "not done\npriority is high", &context());
        assert_eq!(ids(&matched), vec!["mixed.md:1", "mixed.md:4"]);
        assert!(matched
            .iter()
            .all(|t| t.status.is_open() && t.priority == Some(Priority::High)));
    }

    #[test]
    fn test_windows_line_endings() {
        let tasks = tasks();
        let matched = evaluate_query(&tasks, "done\r\nhas tag home\r\n", &context());
        assert_eq!(ids(&matched), vec!["mixed.md:3"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let tasks = tasks();
        let matched = evaluate_query(&tasks, "has tag work", &context());
        assert_eq!(
            ids(&matched),
            vec![
                "mixed.md:1",
                "mixed.md:2",
                "mixed.md:4",
                "mixed.md:5",
                "mixed.md:7"
            ]
        );
    }
}
