//! Abstract Syntax Tree (AST) for query clauses.

use std::fmt;

use mdtasks_core::models::{DateField, Priority};

/// Represents a parsed query clause.
///
/// Each clause line is parsed once into a `Filter`, which is then evaluated
/// against every task. String arguments are stored lower-cased, with any
/// leading `#` already removed for tag arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    // ==================== Boolean Operators ====================
    /// All sub-filters must match.
    And(Vec<Filter>),

    /// At least one sub-filter must match.
    Or(Vec<Filter>),

    /// Negation of a filter.
    Not(Box<Filter>),

    // ==================== Status ====================
    /// Matches on task status.
    Status(StatusFilter),

    // ==================== Dates ====================
    /// Matches on one of the four date fields.
    Date {
        /// The field being tested.
        field: DateField,
        /// The test applied to it.
        condition: DateCondition,
    },

    /// A date predicate whose argument is not a `YYYY-MM-DD` date.
    /// Never matches.
    InvalidDate(String),

    // ==================== Tags ====================
    /// Matches tasks with at least one tag.
    HasTags,

    /// Matches tasks without tags.
    NoTags,

    /// Matches tasks carrying exactly this tag (without `#`).
    HasTag(String),

    /// Matches tasks with a tag containing this text (without `#`).
    TagIncludes(String),

    // ==================== Path and Description ====================
    /// Matches tasks whose file path contains the text.
    PathIncludes(String),

    /// Matches tasks whose file path does not contain the text.
    PathExcludes(String),

    /// Matches tasks whose description contains the text.
    DescriptionIncludes(String),

    /// Matches tasks whose description does not contain the text.
    DescriptionExcludes(String),

    // ==================== Priority ====================
    /// Matches on priority; `None` matches tasks without a priority marker.
    Priority(Option<Priority>),

    // ==================== Recurrence ====================
    /// Matches recurring (`true`) or non-recurring (`false`) tasks.
    Recurring(bool),

    // ==================== Fallback ====================
    /// Unrecognized clause, matched as a description substring.
    Text(String),
}

/// Status keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// `done`: complete tasks only.
    Done,
    /// `not done`: incomplete or in-progress tasks.
    NotDone,
    /// `cancelled`
    Cancelled,
    /// `in progress`
    InProgress,
}

/// A test applied to a date field.
///
/// Dates are held as normalized `YYYY-MM-DD` strings so that comparisons are
/// plain lexicographic comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCondition {
    /// The field is set.
    Present,
    /// The field is not set.
    Absent,
    /// The field equals the evaluation date.
    Today,
    /// The field is before the evaluation date.
    BeforeToday,
    /// The field is after the evaluation date.
    AfterToday,
    /// The field equals the given date.
    On(String),
    /// The field is before the given date.
    Before(String),
    /// The field is after the given date.
    After(String),
}

impl Filter {
    /// Creates a NOT filter from another filter.
    ///
    /// # Example
    ///
    /// ```
    /// use mdtasks_vault::filter::Filter;
    ///
    /// let filter = Filter::negate(Filter::HasTags);
    /// assert!(matches!(filter, Filter::Not(_)));
    /// ```
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Creates a date filter.
    pub fn date(field: DateField, condition: DateCondition) -> Self {
        Filter::Date { field, condition }
    }
}

/// Keyword that introduces a date predicate for the field.
pub(crate) fn date_keyword(field: DateField) -> &'static str {
    match field {
        DateField::Due => "due",
        DateField::Scheduled => "scheduled",
        DateField::Start => "starts",
        DateField::Created => "created",
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, filters: &[Filter], sep: &str) -> fmt::Result {
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{filter}")?;
    }
    Ok(())
}

/// Renders the canonical clause text, which parses back to the same filter
/// for every leaf predicate.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(filters) => write_joined(f, filters, " and "),
            Filter::Or(filters) => write_joined(f, filters, " or "),
            Filter::Not(inner) => write!(f, "not {inner}"),
            Filter::Status(status) => write!(f, "{status}"),
            Filter::Date { field, condition } => {
                let keyword = date_keyword(*field);
                match condition {
                    DateCondition::Present => write!(f, "has {field} date"),
                    DateCondition::Absent => write!(f, "no {field} date"),
                    DateCondition::Today => write!(f, "{keyword} today"),
                    DateCondition::BeforeToday => write!(f, "{keyword} before today"),
                    DateCondition::AfterToday => write!(f, "{keyword} after today"),
                    DateCondition::On(date) => write!(f, "{keyword} on {date}"),
                    DateCondition::Before(date) => write!(f, "{keyword} before {date}"),
                    DateCondition::After(date) => write!(f, "{keyword} after {date}"),
                }
            }
            Filter::InvalidDate(clause) => f.write_str(clause),
            Filter::HasTags => f.write_str("has tags"),
            Filter::NoTags => f.write_str("no tags"),
            Filter::HasTag(tag) => write!(f, "has tag #{tag}"),
            Filter::TagIncludes(text) => write!(f, "tag includes {text}"),
            Filter::PathIncludes(text) => write!(f, "path includes {text}"),
            Filter::PathExcludes(text) => write!(f, "path does not include {text}"),
            Filter::DescriptionIncludes(text) => write!(f, "description includes {text}"),
            Filter::DescriptionExcludes(text) => {
                write!(f, "description does not include {text}")
            }
            Filter::Priority(Some(priority)) => write!(f, "priority is {priority}"),
            Filter::Priority(None) => f.write_str("priority is none"),
            Filter::Recurring(true) => f.write_str("is recurring"),
            Filter::Recurring(false) => f.write_str("is not recurring"),
            Filter::Text(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::Done => "done",
            StatusFilter::NotDone => "not done",
            StatusFilter::Cancelled => "cancelled",
            StatusFilter::InProgress => "in progress",
        })
    }
}
