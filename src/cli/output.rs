use serde::Serialize;

use crate::model::log_entry::LogEntry;
use crate::model::task::{Priority, TaskItem};
use crate::parse::{format_date, format_timestamp};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub index: usize,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub due: String,
    pub priority: Priority,
    pub completed: bool,
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

#[derive(Serialize)]
pub struct LogEntryJson {
    pub timestamp: String,
    pub command: String,
}

#[derive(Serialize)]
pub struct UserJson<'a> {
    pub username: &'a str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// `index` is 1-based, matching the text listing
pub fn task_to_json(index: usize, task: &TaskItem) -> TaskJson {
    TaskJson {
        index,
        title: task.title.clone(),
        description: task.description.clone(),
        due: format_date(task.due_date),
        priority: task.priority,
        completed: task.is_completed,
        created: format_timestamp(task.created_date),
        completed_at: task.completed_date.map(format_timestamp),
    }
}

pub fn tasks_to_json(tasks: &[TaskItem]) -> Vec<TaskJson> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| task_to_json(i + 1, t))
        .collect()
}

pub fn log_to_json(entry: &LogEntry) -> LogEntryJson {
    LogEntryJson {
        timestamp: format_timestamp(entry.timestamp),
        command: entry.command_text.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `  1. [x] 2024-01-05 HIGH   Title  (description)`
pub fn format_task_line(index: usize, task: &TaskItem) -> String {
    let mark = if task.is_completed { 'x' } else { ' ' };
    let mut line = format!(
        "{:>3}. [{}] {} {:<6} {}",
        index,
        mark,
        format_date(task.due_date),
        task.priority.as_str(),
        task.title
    );
    if !task.description.is_empty() {
        line.push_str(&format!("  ({})", task.description));
    }
    line
}

pub fn format_task_list(tasks: &[TaskItem]) -> String {
    if tasks.is_empty() {
        return "no tasks\n".to_string();
    }
    let mut out = String::new();
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format_task_line(i + 1, task));
        out.push('\n');
    }
    out
}

pub fn format_history(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "no recent activity\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{}  {}\n",
            format_timestamp(entry.timestamp),
            entry.command_text
        ));
    }
    out
}
