use std::fs;
use std::path::{Path, PathBuf};

use super::{AuditLog, StoreError, TaskStore, UserStore};

pub const USERS_FILE: &str = "users.txt";
pub const USER_DATA_DIR: &str = "UserData";
pub const COMMAND_LOG_FILE: &str = "command_log.txt";
pub const ERROR_LOG_FILE: &str = "error_log.txt";
pub const CONFIG_FILE: &str = "taskbook.toml";

/// Characters rejected in file names on at least one supported platform
const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// The single directory holding every store file:
///
/// ```text
/// <root>/users.txt
/// <root>/command_log.txt
/// <root>/error_log.txt
/// <root>/taskbook.toml        (optional)
/// <root>/UserData/<user>.txt
/// ```
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Open the data directory, creating it and `UserData/` if absent.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let user_data = root.join(USER_DATA_DIR);
        fs::create_dir_all(&user_data).map_err(|e| StoreError::io(&user_data, e))?;
        Ok(DataDir {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_file(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }

    pub fn user_data_dir(&self) -> PathBuf {
        self.root.join(USER_DATA_DIR)
    }

    pub fn command_log(&self) -> PathBuf {
        self.root.join(COMMAND_LOG_FILE)
    }

    pub fn error_log(&self) -> PathBuf {
        self.root.join(ERROR_LOG_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn user_store(&self) -> UserStore {
        UserStore::new(self.users_file())
    }

    pub fn task_store(&self) -> TaskStore {
        TaskStore::new(self.user_data_dir())
    }

    pub fn audit_log(&self) -> AuditLog {
        AuditLog::new(self.command_log(), self.error_log())
    }
}

/// Map a username to a safe file stem: every character that is illegal in a
/// file name (including control characters) becomes `_`.
pub fn sanitize_username(username: &str) -> String {
    username
        .chars()
        .map(|c| {
            if c.is_control() || ILLEGAL_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}
