//! Clause parser.

use chrono::NaiveDate;
use mdtasks_core::models::{DateField, Priority};

use super::ast::{date_keyword, DateCondition, Filter, StatusFilter};

/// Parser for single query clauses.
///
/// A clause is lower-cased and trimmed, then split on boolean connectives
/// before any predicate is recognized:
///
/// 1. If it contains `" and "`, every part must match.
/// 2. Otherwise, if it contains `" or "`, any part must match.
/// 3. Otherwise, if it starts with `"not "`, the remainder is negated.
///
/// Parts are parsed recursively with the same rules, so `a or b and c` is an
/// AND of `a or b` and `c`. There is no grouping syntax. The status keyword
/// `not done` is recognized before the `not ` connective.
///
/// Anything that is not a known predicate becomes [`Filter::Text`], a
/// description substring search, so parsing never fails.
///
/// # Example
///
/// ```
/// use mdtasks_vault::filter::{Filter, FilterParser, StatusFilter};
///
/// let filter = FilterParser::parse("Done");
/// assert_eq!(filter, Filter::Status(StatusFilter::Done));
///
/// let filter = FilterParser::parse("has tag #work or no tags");
/// assert!(matches!(filter, Filter::Or(_)));
///
/// let filter = FilterParser::parse("groceries");
/// assert_eq!(filter, Filter::Text("groceries".to_string()));
/// ```
pub struct FilterParser;

impl FilterParser {
    /// Parses one clause into a [`Filter`].
    pub fn parse(clause: &str) -> Filter {
        Self::parse_normalized(&clause.trim().to_lowercase())
    }

    fn parse_normalized(clause: &str) -> Filter {
        let clause = clause.trim();

        if clause.contains(" and ") {
            return Filter::And(clause.split(" and ").map(Self::parse_normalized).collect());
        }

        if clause.contains(" or ") {
            return Filter::Or(clause.split(" or ").map(Self::parse_normalized).collect());
        }

        if clause == "not done" {
            return Filter::Status(StatusFilter::NotDone);
        }

        if let Some(rest) = clause.strip_prefix("not ") {
            return Filter::negate(Self::parse_normalized(rest));
        }

        Self::parse_predicate(clause)
    }

    fn parse_predicate(clause: &str) -> Filter {
        match clause {
            "done" => return Filter::Status(StatusFilter::Done),
            "cancelled" => return Filter::Status(StatusFilter::Cancelled),
            "in progress" => return Filter::Status(StatusFilter::InProgress),
            "has tags" => return Filter::HasTags,
            "no tags" => return Filter::NoTags,
            "is recurring" => return Filter::Recurring(true),
            "is not recurring" => return Filter::Recurring(false),
            _ => {}
        }

        if let Some(filter) = Self::parse_date_presence(clause) {
            return filter;
        }

        if let Some(filter) = Self::parse_date_predicate(clause) {
            return filter;
        }

        if let Some(tag) = clause.strip_prefix("has tag ") {
            return Filter::HasTag(strip_hash(tag.trim()).to_string());
        }

        if let Some(text) = clause.strip_prefix("tag includes ") {
            return Filter::TagIncludes(strip_hash(text.trim()).to_string());
        }

        if let Some(text) = clause.strip_prefix("path does not include ") {
            return Filter::PathExcludes(text.trim().to_string());
        }

        if let Some(text) = clause.strip_prefix("path includes ") {
            return Filter::PathIncludes(text.trim().to_string());
        }

        if let Some(text) = clause.strip_prefix("description does not include ") {
            return Filter::DescriptionExcludes(text.trim().to_string());
        }

        if let Some(text) = clause.strip_prefix("description includes ") {
            return Filter::DescriptionIncludes(text.trim().to_string());
        }

        if let Some(level) = clause.strip_prefix("priority is ") {
            let level = level.trim();
            if level == "none" {
                return Filter::Priority(None);
            }
            if let Ok(priority) = level.parse::<Priority>() {
                return Filter::Priority(Some(priority));
            }
        }

        Filter::Text(clause.to_string())
    }

    /// Parses `has <field> date` and `no <field> date`.
    fn parse_date_presence(clause: &str) -> Option<Filter> {
        let (condition, rest) = if let Some(rest) = clause.strip_prefix("has ") {
            (DateCondition::Present, rest)
        } else if let Some(rest) = clause.strip_prefix("no ") {
            (DateCondition::Absent, rest)
        } else {
            return None;
        };

        let field_name = rest.strip_suffix(" date")?;
        let field = DateField::ALL
            .into_iter()
            .find(|field| field.as_str() == field_name)?;
        Some(Filter::date(field, condition))
    }

    /// Parses `<keyword> today|before today|after today|[on] <date>|before <date>|after <date>`.
    ///
    /// A `before`, `after` or `on` argument that is not a date yields
    /// [`Filter::InvalidDate`]. A bare argument that is not a date is left to
    /// the text fallback, so `created a page` stays a description search.
    fn parse_date_predicate(clause: &str) -> Option<Filter> {
        let (field, rest) = DateField::ALL.into_iter().find_map(|field| {
            clause
                .strip_prefix(date_keyword(field))
                .and_then(|rest| rest.strip_prefix(' '))
                .map(|rest| (field, rest.trim()))
        })?;

        let condition = match rest {
            "today" => DateCondition::Today,
            "before today" => DateCondition::BeforeToday,
            "after today" => DateCondition::AfterToday,
            _ => {
                let (make, arg): (fn(String) -> DateCondition, &str) =
                    if let Some(arg) = rest.strip_prefix("before ") {
                        (DateCondition::Before, arg)
                    } else if let Some(arg) = rest.strip_prefix("after ") {
                        (DateCondition::After, arg)
                    } else if let Some(arg) = rest.strip_prefix("on ") {
                        (DateCondition::On, arg)
                    } else {
                        return normalize_date(rest)
                            .map(|date| Filter::date(field, DateCondition::On(date)));
                    };

                match normalize_date(arg.trim()) {
                    Some(date) => make(date),
                    None => return Some(Filter::InvalidDate(clause.to_string())),
                }
            }
        };

        Some(Filter::date(field, condition))
    }
}

/// Parses a `YYYY-MM-DD` date and re-renders it zero-padded.
///
/// The year must be exactly four ASCII digits so the rendered date still
/// compares correctly as a string.
fn normalize_date(text: &str) -> Option<String> {
    let (year, _) = text.split_once('-')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}

fn strip_hash(text: &str) -> &str {
    text.strip_prefix('#').unwrap_or(text)
}
