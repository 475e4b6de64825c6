//! Plain-text rendering for the CLI.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::model::{List, Task};

/// `YYYY-MM-DD`, or `No date`.
#[must_use]
pub fn due_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "No date".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Comma-separated tags, or `None`.
#[must_use]
pub fn tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "None".to_string()
    } else {
        tags.join(", ")
    }
}

/// One line per list: `  1  Home`, with a marker on the selected one.
#[must_use]
pub fn list_rows(lists: &[List], selected: Option<u64>) -> String {
    let mut out = String::new();
    for list in lists {
        let marker = if Some(list.id) == selected { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {:>3}  {}", list.id, list.name);
    }
    out
}

/// Multi-line summary of a task.
#[must_use]
pub fn task_block(task: &Task) -> String {
    let description = if task.description.is_empty() {
        "No description provided"
    } else {
        task.description.as_str()
    };
    let status = if task.completed { "Completed" } else { "Incomplete" };

    let mut out = String::new();
    let _ = writeln!(out, "#{} {} [{}]", task.id, task.title, task.priority);
    let _ = writeln!(out, "  {description}");
    let _ = writeln!(out, "  Due: {}", due_date(task.due_date));
    let _ = writeln!(out, "  Tags: {}", tags(&task.tags));
    let _ = writeln!(out, "  Time: {}/{} h", task.estimated_time, task.actual_time_spent);
    let _ = writeln!(out, "  Status: {status}");
    for comment in &task.comments {
        let _ = writeln!(
            out,
            "  > {} ({}, {})",
            comment.text,
            comment.author,
            comment.created_at.format("%Y-%m-%d")
        );
    }
    out
}
