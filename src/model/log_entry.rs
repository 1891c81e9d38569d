use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub username: String,
    pub command_text: String,
}
