//! Line-level task recognizer.
//!
//! A line is a task when it is a list item (`-`, `*`, `+`, `1.` or `1)`),
//! optionally indented or quoted with `>`, followed by a one-character
//! checkbox such as `[ ]` or `[x]`. Metadata is read from the text after the
//! checkbox using the emoji markers of the Obsidian Tasks convention:
//!
//! | Field | Marker |
//! |---|---|
//! | due date | `📅` or `🗓️` |
//! | scheduled date | `⏳` |
//! | start date | `🛫` |
//! | created date | `➕` |
//! | priority | `⏫⏫` (or `🔺`) `⏫` `🔼` `🔽` `⏬` |
//! | recurrence | `🔁` |
//!
//! # Example
//!
//! ```
//! use mdtasks_core::recognize::recognize;
//! use mdtasks_core::models::{Priority, TaskStatus};
//!
//! let task = recognize("- [ ] Report 📅 2025-05-01 #work ⏫", "inbox.md", 4).unwrap();
//! assert_eq!(task.id, "inbox.md:4");
//! assert_eq!(task.status, TaskStatus::Incomplete);
//! assert_eq!(task.due_date.as_deref(), Some("2025-05-01"));
//! assert_eq!(task.tags, vec!["#work"]);
//! assert_eq!(task.priority, Some(Priority::High));
//!
//! assert!(recognize("Just a paragraph", "inbox.md", 5).is_none());
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Priority, Task, TaskStatus};

/// Indentation or quote prefix, list marker, spaces, checkbox, remainder.
static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s>]*(?:[-*+]|[0-9]+[.)]) +\[(.)\](.*)$").expect("TASK_LINE should be valid")
});

/// A `#` at the start or after whitespace, up to whitespace or punctuation.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(#[^\s!@#$%^&*(),.?":{}|<>]+)"#).expect("TAG should be valid")
});

static DUE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:📅|🗓\x{FE0F}?)\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("DUE_DATE should be valid")
});

static SCHEDULED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"⏳\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("SCHEDULED_DATE should be valid")
});

static START_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"🛫\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("START_DATE should be valid")
});

static CREATED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"➕\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("CREATED_DATE should be valid")
});

/// Single alternation so the leftmost marker wins regardless of severity.
/// `⏫⏫` comes before `⏫` so the doubled form wins at the same position.
static PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"⏫⏫|🔺|⏫|🔼|🔽|⏬").expect("PRIORITY should be valid"));

static RECURRENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"🔁\s*(\S+)").expect("RECURRENCE should be valid"));

/// Recognizes a single line.
///
/// Returns `None` when the line has no list-item checkbox. Lines with a
/// checkbox whose symbol is not a task marker are still returned, with
/// status [`TaskStatus::NonTask`].
pub fn recognize(line: &str, file_path: &str, line_number: usize) -> Option<Task> {
    let caps = TASK_LINE.captures(line)?;
    let status_symbol = caps.get(1)?.as_str().chars().next()?;
    let description = caps.get(2).map_or("", |m| m.as_str()).trim();

    Some(Task {
        id: Task::make_id(file_path, line_number),
        description: description.to_string(),
        status: TaskStatus::from_symbol(status_symbol),
        status_symbol,
        file_path: file_path.to_string(),
        line_number,
        tags: extract_tags(description),
        due_date: capture_first(&DUE_DATE, description),
        scheduled_date: capture_first(&SCHEDULED_DATE, description),
        start_date: capture_first(&START_DATE, description),
        created_date: capture_first(&CREATED_DATE, description),
        priority: extract_priority(description),
        recurrence: capture_first(&RECURRENCE, description),
        original_markdown: line.to_string(),
    })
}

/// Recognizes every line of a document.
///
/// Lines are numbered from zero; both LF and CRLF line endings are accepted.
/// Tasks are returned in line order.
pub fn recognize_document(text: &str, file_path: &str) -> Vec<Task> {
    text.lines()
        .enumerate()
        .filter_map(|(line_number, line)| recognize(line, file_path, line_number))
        .collect()
}

/// Collects tags in order of appearance, keeping duplicates.
pub fn extract_tags(description: &str) -> Vec<String> {
    TAG.captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Returns the priority of the leftmost priority marker.
pub fn extract_priority(description: &str) -> Option<Priority> {
    PRIORITY
        .find(description)
        .and_then(|m| Priority::from_marker(m.as_str()))
}

fn capture_first(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
