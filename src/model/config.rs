use serde::{Deserialize, Serialize};

use super::task::Priority;

/// Configuration from taskbook.toml (every field optional)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// How far back the recent-activity view reaches
    #[serde(default = "default_window_hours")]
    pub recent_window_hours: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            recent_window_hours: default_window_hours(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub default_priority: Priority,
    /// New tasks without an explicit due date are due this many days from today
    #[serde(default = "default_due_in_days")]
    pub default_due_in_days: i64,
}

impl Default for TasksConfig {
    fn default() -> Self {
        TasksConfig {
            default_priority: Priority::default(),
            default_due_in_days: default_due_in_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

fn default_window_hours() -> u32 {
    12
}

fn default_due_in_days() -> i64 {
    1
}

fn default_lock_timeout_ms() -> u64 {
    5000
}

impl AuditConfig {
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.recent_window_hours))
    }
}
