//! Common helper functions for output formatting.

use chrono::{Local, NaiveDate};
use mdtasks_core::models::{Priority, TaskStatus};
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a status as a checkbox for display.
pub fn format_status(status: TaskStatus, symbol: char, use_colors: bool) -> String {
    let label = format!("[{symbol}]");

    if use_colors {
        match status {
            TaskStatus::Complete => label.green().to_string(),
            TaskStatus::InProgress => label.yellow().to_string(),
            TaskStatus::Cancelled | TaskStatus::NonTask => label.dimmed().to_string(),
            TaskStatus::Incomplete => label,
        }
    } else {
        label
    }
}

/// Formats priority for display.
pub fn format_priority(priority: Option<Priority>, use_colors: bool) -> String {
    let Some(priority) = priority else {
        return String::new();
    };
    let label = priority.as_str();

    if use_colors {
        match priority {
            Priority::Highest => label.red().bold().to_string(),
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.blue().to_string(),
            Priority::Lowest => label.dimmed().to_string(),
        }
    } else {
        label.to_string()
    }
}

/// Formats a due date for display, relative to today.
pub fn format_due(due_date: Option<&str>, use_colors: bool) -> String {
    format_due_relative(due_date, Local::now().date_naive(), use_colors)
}

fn format_due_relative(due_date: Option<&str>, today: NaiveDate, use_colors: bool) -> String {
    let Some(date_str) = due_date else {
        return String::new();
    };

    let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
        return date_str.to_string();
    };

    let tomorrow = today + chrono::Duration::days(1);
    let yesterday = today - chrono::Duration::days(1);

    let display = if date == today {
        "Today".to_string()
    } else if date == tomorrow {
        "Tomorrow".to_string()
    } else if date == yesterday {
        "Yesterday".to_string()
    } else if date < today {
        let days = (today - date).num_days();
        format!("{days} days ago")
    } else {
        date.format("%b %d").to_string()
    };

    if use_colors {
        if date < today {
            display.red().to_string()
        } else if date == today {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Formats a date field for verbose display (show command).
pub fn format_date_verbose(date_str: &str, use_colors: bool) -> String {
    let relative = format_due(Some(date_str), use_colors);
    if relative == date_str {
        date_str.to_string()
    } else {
        format!("{date_str} ({relative})")
    }
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    truncate_str(&tags.join(" "), max_len)
}
