use crate::model::task::{Priority, TaskItem};

use super::{
    DELIMITER, RecordError, RecordKind, format_date, format_timestamp, parse_date,
    parse_timestamp,
};

const FIELD_COUNT: usize = 7;

/// `title|description|dueDate|priority|isCompleted|createdDate|completedDate`
pub fn encode_task(task: &TaskItem) -> String {
    let completed = task
        .completed_date
        .map(format_timestamp)
        .unwrap_or_default();
    [
        task.title.clone(),
        task.description.clone(),
        format_date(task.due_date),
        task.priority.to_string(),
        task.is_completed.to_string(),
        format_timestamp(task.created_date),
        completed,
    ]
    .join(&DELIMITER.to_string())
}

/// Decode a task line. Any field-count mismatch or unparseable date, bool,
/// or priority is an error; there is no partial result.
pub fn decode_task(line: &str) -> Result<TaskItem, RecordError> {
    let parts: Vec<&str> = line.split(DELIMITER).collect();
    if parts.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            parts.len()
        )));
    }

    let due_date =
        parse_date(parts[2]).ok_or_else(|| malformed(format!("bad due date '{}'", parts[2])))?;
    let priority: Priority = parts[3]
        .parse()
        .map_err(|e: crate::model::task::ParsePriorityError| malformed(e.to_string()))?;
    let is_completed = parse_bool(parts[4])
        .ok_or_else(|| malformed(format!("bad completion flag '{}'", parts[4])))?;
    let created_date = parse_timestamp(parts[5])
        .ok_or_else(|| malformed(format!("bad created date '{}'", parts[5])))?;
    let completed_date = if parts[6].trim().is_empty() {
        None
    } else {
        Some(
            parse_timestamp(parts[6])
                .ok_or_else(|| malformed(format!("bad completed date '{}'", parts[6])))?,
        )
    };

    Ok(TaskItem {
        title: parts[0].to_string(),
        description: parts[1].to_string(),
        due_date,
        priority,
        is_completed,
        created_date,
        completed_date,
    })
}

/// `true`/`false`, also the capitalized `True`/`False` older files contain
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        b if b.eq_ignore_ascii_case("true") => Some(true),
        b if b.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn malformed(reason: impl Into<String>) -> RecordError {
    RecordError::malformed(RecordKind::Task, reason)
}
