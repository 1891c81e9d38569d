use chrono::{Duration, NaiveDate};
use tracing::info;

use super::task_ops::{filter_tasks, remove_task, toggle_completion, toggle_message};
use crate::io::audit_log::SYSTEM_USER;
use crate::io::{AuditLog, DataDir, StoreError, TaskStore};
use crate::model::log_entry::LogEntry;
use crate::model::task::{Priority, TaskItem};
use crate::parse::breaks_record;

/// Error type for task service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One user's task session.
///
/// Every mutation reloads the user's full task list, applies the change,
/// saves the whole list back, records an audit entry, and then refreshes
/// the visible view (`tasks()`) under the current search term and
/// completed-task setting.
pub struct TaskService {
    username: String,
    store: TaskStore,
    audit: AuditLog,
    window: Duration,
    search_term: String,
    include_completed: bool,
    view: Vec<TaskItem>,
}

impl TaskService {
    /// Build a session over explicit stores without loading anything.
    pub fn new(username: String, store: TaskStore, audit: AuditLog, window: Duration) -> Self {
        TaskService {
            username,
            store,
            audit,
            window,
            search_term: String::new(),
            include_completed: false,
            view: Vec::new(),
        }
    }

    /// Open a session for an authenticated user and load the initial
    /// pending-only view. `window` bounds [`recent_activity`](Self::recent_activity).
    pub fn open(dir: &DataDir, username: &str, window: Duration) -> Result<Self, ServiceError> {
        let mut service = TaskService::new(
            username.to_string(),
            dir.task_store(),
            dir.audit_log(),
            window,
        );
        service.refresh()?;
        Ok(service)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The current view, in display order
    pub fn tasks(&self) -> &[TaskItem] {
        &self.view
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn include_completed(&self) -> bool {
        self.include_completed
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a pending task. The title is required; neither field may
    /// contain `|` or line breaks.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Result<TaskItem, ServiceError> {
        if title.trim().is_empty() {
            return Err(ServiceError::Validation("task title is required".into()));
        }
        if breaks_record(title) || breaks_record(description) {
            return Err(ServiceError::Validation(
                "title and description may not contain '|' or line breaks".into(),
            ));
        }

        let task = TaskItem::new(title.to_string(), description.to_string(), due_date, priority);
        let mut all = self.load_all()?;
        all.push(task.clone());
        self.save_all(&all)?;
        self.audit
            .append(&self.username, &format!("Added task: {}", task.title));
        info!(user = %self.username, title = %task.title, "added task");

        self.refresh()?;
        Ok(task)
    }

    /// Delete the first stored task equal to `task`. Returns `false`, and
    /// touches nothing, if no such task exists.
    pub fn delete_task(&mut self, task: &TaskItem) -> Result<bool, ServiceError> {
        let mut all = self.load_all()?;
        if !remove_task(&mut all, task) {
            return Ok(false);
        }
        self.save_all(&all)?;
        self.audit
            .append(&self.username, &format!("Deleted task: {}", task.title));
        info!(user = %self.username, title = %task.title, "deleted task");

        self.refresh()?;
        Ok(true)
    }

    /// Flip completion of the first stored task equal to `task` and return
    /// its new state, or `None` if no such task exists.
    pub fn toggle_status(&mut self, task: &TaskItem) -> Result<Option<TaskItem>, ServiceError> {
        let mut all = self.load_all()?;
        let Some(stored) = all.iter_mut().find(|t| **t == *task) else {
            return Ok(None);
        };
        toggle_completion(stored);
        let updated = stored.clone();

        self.save_all(&all)?;
        self.audit.append(&self.username, &toggle_message(&updated));
        info!(user = %self.username, title = %updated.title, completed = updated.is_completed, "toggled task");

        self.refresh()?;
        Ok(Some(updated))
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    /// Set the search term and completed-task setting, then reload the view.
    pub fn filter(
        &mut self,
        search_term: &str,
        include_completed: bool,
    ) -> Result<&[TaskItem], ServiceError> {
        self.search_term = search_term.to_string();
        self.include_completed = include_completed;
        self.refresh()
    }

    /// Switch between pending-only and all tasks.
    pub fn toggle_view(&mut self) -> Result<&[TaskItem], ServiceError> {
        self.include_completed = !self.include_completed;
        self.refresh()
    }

    /// Reload the view from storage under the current settings.
    pub fn refresh(&mut self) -> Result<&[TaskItem], ServiceError> {
        let all = self.load_all()?;
        self.view = filter_tasks(all, &self.search_term, self.include_completed);
        Ok(&self.view)
    }

    /// This user's audit entries inside the configured window, newest first.
    pub fn recent_activity(&self) -> Result<Vec<LogEntry>, ServiceError> {
        let mut entries = self.audit.recent(&self.username, self.window)?;
        entries.reverse();
        Ok(entries)
    }

    // -----------------------------------------------------------------------
    // Store access
    // -----------------------------------------------------------------------

    fn load_all(&self) -> Result<Vec<TaskItem>, StoreError> {
        self.store.load(&self.username).inspect_err(|e| {
            self.audit
                .append(SYSTEM_USER, &format!("Error loading tasks: {}", e));
        })
    }

    fn save_all(&self, tasks: &[TaskItem]) -> Result<(), StoreError> {
        self.store.save(&self.username, tasks).inspect_err(|e| {
            self.audit
                .append(SYSTEM_USER, &format!("Error saving tasks: {}", e));
        })
    }
}
