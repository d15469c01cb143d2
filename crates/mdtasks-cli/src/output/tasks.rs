//! Task output formatting.

use mdtasks_core::models::Task;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{
    format_date_verbose, format_due, format_priority, format_status, format_tags, truncate_str,
};

/// JSON output structure for list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub tasks: &'a [&'a Task],
    /// Number of matching tasks before the limit was applied.
    pub total: usize,
    pub has_more: bool,
}

/// Formats tasks as JSON.
pub fn format_tasks_json(tasks: &[&Task], total: usize) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        tasks,
        total,
        has_more: total > tasks.len(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats task details as JSON (show command).
pub fn format_task_details_json(task: &Task) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(task)
}

/// Formats tasks as a table.
pub fn format_tasks_table(tasks: &[&Task], total: usize, use_colors: bool) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<4} {:<8} {:<12} {:<24} {:<15} {}",
        "", "Pri", "Due", "Location", "Tags", "Description"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for task in tasks {
        // Widths come from the plain text; ANSI codes take no columns
        let status = pad(
            format_status(task.status, task.status_symbol, use_colors),
            &format!("[{}]", task.status_symbol),
            4,
        );
        let priority = pad(
            format_priority(task.priority, use_colors),
            task.priority.map_or("", |p| p.as_str()),
            8,
        );
        let due_plain = format_due(task.due_date.as_deref(), false);
        let due = pad(format_due(task.due_date.as_deref(), use_colors), &due_plain, 12);
        let location = truncate_str(&task.id, 24);
        let tags = format_tags(&task.tags, 15);

        let line = format!(
            "{} {} {} {:<24} {:<15} {}",
            status, priority, due, location, tags, task.description
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    if total > tasks.len() {
        let footer = format!("({} of {} tasks shown, use --all to see every task)", tasks.len(), total);
        if use_colors {
            output.push_str(&format!("{}\n", footer.dimmed()));
        } else {
            output.push_str(&footer);
            output.push('\n');
        }
    }

    output
}

/// Pads a possibly colored string using the width of its plain text.
fn pad(styled: String, plain: &str, width: usize) -> String {
    let visible = plain.chars().count();
    if visible >= width {
        styled
    } else {
        format!("{styled}{}", " ".repeat(width - visible))
    }
}

/// Formats task details as a human-readable table (show command).
pub fn format_task_details_table(task: &Task, use_colors: bool) -> String {
    let mut output = String::new();

    let content_label = if use_colors {
        "Task:".bold().to_string()
    } else {
        "Task:".to_string()
    };
    output.push_str(&format!("{} {}\n", content_label, task.description));

    output.push_str(&format!("ID: {}\n", task.id));
    output.push_str(&format!(
        "Status: {} {}\n",
        format_status(task.status, task.status_symbol, use_colors),
        task.status
    ));
    output.push_str(&format!("File: {} (line {})\n", task.file_path, task.line_number));

    if task.priority.is_some() {
        output.push_str(&format!(
            "Priority: {}\n",
            format_priority(task.priority, use_colors)
        ));
    }

    let dates = [
        ("Due", &task.due_date),
        ("Scheduled", &task.scheduled_date),
        ("Starts", &task.start_date),
        ("Created", &task.created_date),
    ];
    for (label, date) in dates {
        if let Some(date) = date {
            output.push_str(&format!("{}: {}\n", label, format_date_verbose(date, use_colors)));
        }
    }

    if let Some(ref recurrence) = task.recurrence {
        output.push_str(&format!("Recurs: {}\n", recurrence));
    }

    if !task.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", task.tags.join(", ")));
    }

    output.push_str("Markdown:\n");
    output.push_str(&format!("  {}\n", task.original_markdown));

    output
}
