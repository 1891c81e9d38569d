use crate::model::log_entry::LogEntry;

use super::{DELIMITER, RecordError, RecordKind, format_timestamp, parse_timestamp};

/// `timestamp|username|commandText`
pub fn encode_log(entry: &LogEntry) -> String {
    format!(
        "{ts}{d}{user}{d}{text}",
        ts = format_timestamp(entry.timestamp),
        d = DELIMITER,
        user = entry.username,
        text = entry.command_text,
    )
}

/// Decode an audit line. The command text is everything after the second
/// delimiter, so it may itself contain `|`.
pub fn decode_log(line: &str) -> Result<LogEntry, RecordError> {
    let mut parts = line.splitn(3, DELIMITER);
    let (Some(ts), Some(username), Some(command_text)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(RecordError::malformed(
            RecordKind::Log,
            "expected timestamp|username|command",
        ));
    };
    let timestamp = parse_timestamp(ts)
        .ok_or_else(|| RecordError::malformed(RecordKind::Log, format!("bad timestamp '{}'", ts)))?;
    Ok(LogEntry {
        timestamp,
        username: username.to_string(),
        command_text: command_text.to_string(),
    })
}
