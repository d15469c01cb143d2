//! Filter evaluation against recognized tasks.
//!
//! This module provides the [`FilterEvaluator`] for evaluating parsed clauses
//! against [`Task`] records.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use mdtasks_core::recognize::recognize;
//! use mdtasks_vault::filter::{FilterContext, FilterEvaluator, FilterParser};
//!
//! let task = recognize("- [ ] Pay rent 📅 2025-05-01 #home", "bills.md", 0).unwrap();
//!
//! let filter = FilterParser::parse("due before 2025-06-01 and has tag home");
//! let context = FilterContext::new(NaiveDate::from_ymd_opt(2025, 4, 28).unwrap());
//! let evaluator = FilterEvaluator::new(&filter, &context);
//!
//! assert!(evaluator.matches(&task));
//! ```

use chrono::{Local, NaiveDate};
use mdtasks_core::models::{Task, TaskStatus};

use super::ast::{DateCondition, Filter, StatusFilter};
use super::parser::FilterParser;

/// Context for filter evaluation.
///
/// Holds the date that `today`-relative predicates compare against, so that
/// evaluation is a pure function of the task, the filter and this context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterContext {
    today: NaiveDate,
    today_str: String,
}

impl FilterContext {
    /// Creates a context that evaluates relative dates against `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            today_str: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Creates a context for the current local date.
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Returns the evaluation date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the evaluation date formatted as `YYYY-MM-DD`.
    pub fn today_str(&self) -> &str {
        &self.today_str
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::now()
    }
}

/// Evaluates a parsed filter against tasks.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    filter: &'a Filter,
    context: &'a FilterContext,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(filter: &'a Filter, context: &'a FilterContext) -> Self {
        Self { filter, context }
    }

    /// Returns true if the task matches the filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.evaluate_filter(self.filter, task)
    }

    /// Filters a slice of tasks, returning only those that match.
    pub fn filter_tasks<'b>(&self, tasks: &'b [Task]) -> Vec<&'b Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    /// Evaluates a filter expression against a task.
    fn evaluate_filter(&self, filter: &Filter, task: &Task) -> bool {
        match filter {
            // Boolean operators
            Filter::And(filters) => filters.iter().all(|f| self.evaluate_filter(f, task)),
            Filter::Or(filters) => filters.iter().any(|f| self.evaluate_filter(f, task)),
            Filter::Not(inner) => !self.evaluate_filter(inner, task),

            Filter::Status(status) => matches_status(*status, task.status),

            Filter::Date { field, condition } => {
                self.matches_date(task.date(*field), condition)
            }
            Filter::InvalidDate(_) => false,

            // Tags
            Filter::HasTags => !task.tags.is_empty(),
            Filter::NoTags => task.tags.is_empty(),
            Filter::HasTag(name) => normalized_tags(task).any(|tag| tag == *name),
            Filter::TagIncludes(text) => normalized_tags(task).any(|tag| tag.contains(text)),

            // Substring predicates
            Filter::PathIncludes(text) => contains_lower(&task.file_path, text),
            Filter::PathExcludes(text) => !contains_lower(&task.file_path, text),
            Filter::DescriptionIncludes(text) | Filter::Text(text) => {
                contains_lower(&task.description, text)
            }
            Filter::DescriptionExcludes(text) => !contains_lower(&task.description, text),

            Filter::Priority(priority) => task.priority == *priority,
            Filter::Recurring(recurring) => task.is_recurring() == *recurring,
        }
    }

    /// Compares a task date against a condition.
    ///
    /// Dates are fixed-width `YYYY-MM-DD` strings, so string order is
    /// calendar order. A missing date only satisfies [`DateCondition::Absent`].
    fn matches_date(&self, value: Option<&str>, condition: &DateCondition) -> bool {
        let today = self.context.today_str();
        match (condition, value) {
            (DateCondition::Present, value) => value.is_some(),
            (DateCondition::Absent, value) => value.is_none(),
            (_, None) => false,
            (DateCondition::Today, Some(date)) => date == today,
            (DateCondition::BeforeToday, Some(date)) => date < today,
            (DateCondition::AfterToday, Some(date)) => date > today,
            (DateCondition::On(target), Some(date)) => date == target.as_str(),
            (DateCondition::Before(target), Some(date)) => date < target.as_str(),
            (DateCondition::After(target), Some(date)) => date > target.as_str(),
        }
    }
}

fn matches_status(filter: StatusFilter, status: TaskStatus) -> bool {
    match filter {
        StatusFilter::Done => status == TaskStatus::Complete,
        StatusFilter::NotDone => status.is_open(),
        StatusFilter::Cancelled => status == TaskStatus::Cancelled,
        StatusFilter::InProgress => status == TaskStatus::InProgress,
    }
}

/// Tags lower-cased with the leading `#` removed.
fn normalized_tags(task: &Task) -> impl Iterator<Item = String> + '_ {
    task.tags.iter().map(|tag| {
        let tag = tag.strip_prefix('#').unwrap_or(tag);
        tag.to_lowercase()
    })
}

/// Case-insensitive substring test; `needle` is already lower-case.
fn contains_lower(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Evaluates a single clause string against a task.
///
/// The clause is parsed on every call; use [`FilterParser`] and
/// [`FilterEvaluator`] directly to evaluate one clause against many tasks.
pub fn evaluate_clause(task: &Task, clause: &str, context: &FilterContext) -> bool {
    let filter = FilterParser::parse(clause);
    FilterEvaluator::new(&filter, context).matches(task)
}
