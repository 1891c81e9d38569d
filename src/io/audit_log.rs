use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use super::{StoreError, read_record_lines};
use super::error_log::log_failure;
use crate::model::log_entry::LogEntry;
use crate::model::task::now_seconds;
use crate::model::user::usernames_match;
use crate::parse::{decode_log, encode_log};

/// Username recorded for entries the stores write on their own behalf
pub const SYSTEM_USER: &str = "system";

/// Append-only history of user actions, shared by all users.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
    fallback: PathBuf,
}

impl AuditLog {
    /// `fallback` receives a diagnostic line whenever `path` cannot be appended to
    pub fn new(path: PathBuf, fallback: PathBuf) -> Self {
        AuditLog { path, fallback }
    }

    /// Record an action stamped with the current time. Never fails: on I/O
    /// errors a line goes to the fallback error log instead.
    pub fn append(&self, username: &str, command_text: &str) {
        let entry = LogEntry {
            timestamp: now_seconds(),
            username: username.to_string(),
            command_text: command_text.to_string(),
        };
        if let Err(e) = self.try_append(&entry) {
            warn!(path = %self.path.display(), "audit append failed: {}", e);
            log_failure(&self.fallback, &format!("Failed to log command - {}", e));
        }
    }

    fn try_append(&self, entry: &LogEntry) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", encode_log(entry))
    }

    /// Entries for `username` no older than `window`, oldest first.
    pub fn recent(&self, username: &str, window: Duration) -> Result<Vec<LogEntry>, StoreError> {
        self.recent_as_of(username, window, now_seconds())
    }

    /// [`recent`](Self::recent) with an explicit reference time.
    ///
    /// The username is compared against the parsed field, so `bob` never
    /// sees entries belonging to `bobby`. Undecodable lines are skipped.
    pub fn recent_as_of(
        &self,
        username: &str,
        window: Duration,
        now: NaiveDateTime,
    ) -> Result<Vec<LogEntry>, StoreError> {
        let cutoff = now - window;

        let entries = read_record_lines(&self.path)?
            .into_iter()
            .filter_map(|(_, line)| match decode_log(&line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("skipping audit line: {}", e);
                    None
                }
            })
            .filter(|entry| usernames_match(&entry.username, username))
            .filter(|entry| entry.timestamp >= cutoff)
            .collect();
        Ok(entries)
    }
}
