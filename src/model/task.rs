use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort rank within a due date: HIGH sorts first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Canonical on-disk spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority string is not one of LOW, MEDIUM, HIGH
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    /// Case-insensitive; `Medium` and `medium` are both accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// A single task owned by one user's task file.
///
/// `completed_date` is present exactly when `is_completed` is true. The type
/// does not enforce this; [`crate::ops::task_ops::toggle_completion`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub title: String,
    /// Empty when the task has no description
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub is_completed: bool,
    /// Set once at construction
    pub created_date: NaiveDateTime,
    pub completed_date: Option<NaiveDateTime>,
}

impl TaskItem {
    /// Create a pending task stamped with the current local time
    pub fn new(title: String, description: String, due_date: NaiveDate, priority: Priority) -> Self {
        TaskItem {
            title,
            description,
            due_date,
            priority,
            is_completed: false,
            created_date: now_seconds(),
            completed_date: None,
        }
    }

    /// Case-insensitive substring match against title and description.
    /// An empty or whitespace-only term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Current local time truncated to whole seconds, the precision the task file stores
pub fn now_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaskItem {
        TaskItem::new(
            "Write report".into(),
            "Quarterly numbers".into(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Priority::High,
        )
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("LOW".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_new_task_is_pending() {
        let task = sample();
        assert!(!task.is_completed);
        assert!(task.completed_date.is_none());
        assert_eq!(task.created_date.nanosecond(), 0);
    }

    #[test]
    fn test_matches_title_and_description() {
        let task = sample();
        assert!(task.matches(""));
        assert!(task.matches("   "));
        assert!(task.matches("REPORT"));
        assert!(task.matches("quarterly"));
        assert!(!task.matches("invoice"));
    }
}
