//! Query explanation formatting.

use mdtasks_vault::filter::{Filter, Query};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for the explain command.
#[derive(Serialize)]
pub struct ExplainOutput {
    pub clauses: Vec<FilterNode>,
}

/// One node of a parsed clause tree.
#[derive(Serialize)]
pub struct FilterNode {
    /// `and`, `or`, `not`, `predicate`, `text` or `invalid_date`.
    pub kind: &'static str,
    /// Canonical clause text of this node.
    pub clause: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FilterNode>,
}

impl FilterNode {
    fn from_filter(filter: &Filter) -> Self {
        let (kind, children): (&'static str, Vec<FilterNode>) = match filter {
            Filter::And(parts) => ("and", parts.iter().map(Self::from_filter).collect()),
            Filter::Or(parts) => ("or", parts.iter().map(Self::from_filter).collect()),
            Filter::Not(inner) => ("not", vec![Self::from_filter(inner)]),
            Filter::Text(_) => ("text", vec![]),
            Filter::InvalidDate(_) => ("invalid_date", vec![]),
            _ => ("predicate", vec![]),
        };
        Self {
            kind,
            clause: filter.to_string(),
            children,
        }
    }
}

/// Formats a parsed query as JSON.
pub fn format_explain_json(query: &Query) -> Result<String, serde_json::Error> {
    let output = ExplainOutput {
        clauses: query.clauses().iter().map(FilterNode::from_filter).collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a parsed query as an indented tree, one block per clause.
pub fn format_explain_table(query: &Query, use_colors: bool) -> String {
    let mut output = String::new();

    for (i, filter) in query.clauses().iter().enumerate() {
        let header = format!("Clause {}:", i + 1);
        if use_colors {
            output.push_str(&format!("{} {}\n", header.bold(), filter));
        } else {
            output.push_str(&format!("{} {}\n", header, filter));
        }
        write_tree(&mut output, filter, 1, use_colors);
    }

    output
}

fn write_tree(output: &mut String, filter: &Filter, depth: usize, use_colors: bool) {
    let indent = "  ".repeat(depth);
    match filter {
        Filter::And(parts) | Filter::Or(parts) => {
            let label = if matches!(filter, Filter::And(_)) { "AND" } else { "OR" };
            output.push_str(&format!("{indent}{}\n", colored(label, use_colors)));
            for part in parts {
                write_tree(output, part, depth + 1, use_colors);
            }
        }
        Filter::Not(inner) => {
            output.push_str(&format!("{indent}{}\n", colored("NOT", use_colors)));
            write_tree(output, inner, depth + 1, use_colors);
        }
        Filter::Text(text) => {
            let note = format!("(description contains \"{text}\")");
            output.push_str(&format!("{indent}{}\n", dimmed(&note, use_colors)));
        }
        Filter::InvalidDate(clause) => {
            let note = format!("{clause} (invalid date, never matches)");
            if use_colors {
                output.push_str(&format!("{indent}{}\n", note.red()));
            } else {
                output.push_str(&format!("{indent}{note}\n"));
            }
        }
        _ => output.push_str(&format!("{indent}{filter}\n")),
    }
}

fn colored(label: &str, use_colors: bool) -> String {
    if use_colors {
        label.cyan().to_string()
    } else {
        label.to_string()
    }
}

fn dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}
