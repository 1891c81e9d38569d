use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::StoreError;
use super::data_dir::sanitize_username;
use super::error_log::atomic_write;
use crate::model::task::TaskItem;
use crate::parse::{decode_task, encode_task};

/// One task file per user under `UserData/`.
///
/// Loads and saves are whole-file: `save` replaces the file with exactly the
/// list it is given.
#[derive(Debug, Clone)]
pub struct TaskStore {
    dir: PathBuf,
}

impl TaskStore {
    pub fn new(dir: PathBuf) -> Self {
        TaskStore { dir }
    }

    /// Path of the task file for `username`
    pub fn path_for(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", sanitize_username(username)))
    }

    /// Load a user's tasks in file order. A missing file is an empty list;
    /// any undecodable line fails the whole load with `CorruptStore`.
    pub fn load(&self, username: &str) -> Result<Vec<TaskItem>, StoreError> {
        let path = self.path_for(username);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;

        let mut tasks = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let task = decode_task(line).map_err(|source| StoreError::CorruptStore {
                path: path.clone(),
                line: idx + 1,
                source,
            })?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    /// Replace the user's task file with `tasks`.
    pub fn save(&self, username: &str, tasks: &[TaskItem]) -> Result<(), StoreError> {
        let path = self.path_for(username);
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let mut content = String::new();
        for task in tasks {
            content.push_str(&encode_task(task));
            content.push('\n');
        }
        atomic_write(&path, content.as_bytes()).map_err(|e| StoreError::io(&path, e))?;
        debug!(path = %path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn task(title: &str, due: (i32, u32, u32), priority: Priority) -> TaskItem {
        TaskItem::new(
            title.into(),
            String::new(),
            NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            priority,
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().to_path_buf());
        assert!(store.load("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().to_path_buf());
        let tasks = vec![
            task("later", (2024, 3, 1), Priority::Low),
            task("sooner", (2024, 1, 1), Priority::High),
        ];
        store.save("alice", &tasks).unwrap();

        let loaded = store.load("alice").unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_save_overwrites_instead_of_appending() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().to_path_buf());
        store
            .save("alice", &[task("one", (2024, 1, 1), Priority::Medium)])
            .unwrap();
        store
            .save("alice", &[task("two", (2024, 1, 2), Priority::Medium)])
            .unwrap();

        let loaded = store.load("alice").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "two");
    }

    #[test]
    fn test_load_corrupt_line_fails_whole_load() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().to_path_buf());
        fs::write(
            store.path_for("alice"),
            "ok|d|2024-01-01|LOW|false|2024-01-01 09:00:00|\n\
             short|d|2024-01-01|LOW|false\n",
        )
        .unwrap();

        match store.load("alice") {
            Err(StoreError::CorruptStore { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected CorruptStore, got {:?}", other),
        }
    }

    #[test]
    fn test_path_for_sanitizes() {
        let tmp = TempDir::new().unwrap();
        let store = TaskStore::new(tmp.path().to_path_buf());
        assert_eq!(store.path_for("a/b"), tmp.path().join("a_b.txt"));
    }
}
