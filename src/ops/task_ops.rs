use crate::model::task::{TaskItem, now_seconds};

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

/// Pending → Completed stamps `completed_date` with the current time;
/// Completed → Pending clears it.
pub fn toggle_completion(task: &mut TaskItem) {
    if task.is_completed {
        task.is_completed = false;
        task.completed_date = None;
    } else {
        task.is_completed = true;
        task.completed_date = Some(now_seconds());
    }
}

/// `"Marked task as completed: …"` / `"Marked task as pending: …"`
pub fn toggle_message(task: &TaskItem) -> String {
    let state = if task.is_completed {
        "completed"
    } else {
        "pending"
    };
    format!("Marked task as {}: {}", state, task.title)
}

// ---------------------------------------------------------------------------
// Filtering and ordering
// ---------------------------------------------------------------------------

/// Keep tasks visible under the current view, ordered for display.
///
/// Completed tasks are dropped unless `include_completed`; the search term
/// matches title or description case-insensitively.
pub fn filter_tasks(tasks: Vec<TaskItem>, search_term: &str, include_completed: bool) -> Vec<TaskItem> {
    let mut visible: Vec<TaskItem> = tasks
        .into_iter()
        .filter(|t| include_completed || !t.is_completed)
        .filter(|t| t.matches(search_term))
        .collect();
    sort_tasks(&mut visible);
    visible
}

/// Due date ascending, then HIGH before MEDIUM before LOW. Stable.
pub fn sort_tasks(tasks: &mut [TaskItem]) {
    tasks.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
    });
}

/// Remove the first task equal to `task`. Returns whether one was removed.
pub fn remove_task(tasks: &mut Vec<TaskItem>, task: &TaskItem) -> bool {
    match tasks.iter().position(|t| t == task) {
        Some(idx) => {
            tasks.remove(idx);
            true
        }
        None => false,
    }
}
