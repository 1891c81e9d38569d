//! Line codecs for the three plain-text record files.
//!
//! Every record is one line of `|`-separated fields. Dates use `%Y-%m-%d`,
//! timestamps `%Y-%m-%d %H:%M:%S` in local time.

pub mod log_record;
pub mod task_record;
pub mod user_record;

pub use log_record::{decode_log, encode_log};
pub use task_record::{decode_task, encode_task};
pub use user_record::{decode_user, encode_user};

use chrono::{NaiveDate, NaiveDateTime};

/// Field separator shared by all record kinds
pub const DELIMITER: char = '|';

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which record kind failed to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    User,
    Task,
    Log,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::User => write!(f, "user"),
            RecordKind::Task => write!(f, "task"),
            RecordKind::Log => write!(f, "log"),
        }
    }
}

/// Error type for record decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("malformed {kind} record: {reason}")]
    Malformed { kind: RecordKind, reason: String },
}

impl RecordError {
    pub(crate) fn malformed(kind: RecordKind, reason: impl Into<String>) -> Self {
        RecordError::Malformed {
            kind,
            reason: reason.into(),
        }
    }
}

/// True if `value` would break the one-record-per-line, pipe-delimited layout
pub fn breaks_record(value: &str) -> bool {
    value.contains(DELIMITER) || value.contains('\n') || value.contains('\r')
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a `yyyy-MM-dd` date. A full timestamp is also accepted and its
/// time part dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(s).map(|ts| ts.date()))
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}
