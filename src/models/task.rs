// Task entity for the taskdeck engine
// Monotonic millisecond id, full timestamps, optional day-only due date

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{EngineError, EngineResult};

/// One task. The persisted JSON uses these field names verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Creation-time epoch milliseconds, strictly monotonic within a process
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dueDate: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub createdAt: DateTime<Utc>,
    pub lastModified: DateTime<Utc>,
    /// Present if and only if `completed` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completedAt: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Build a fresh record; text must already be validated
    pub fn new(
        id: i64,
        text: String,
        description: Option<String>,
        dueDate: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            description,
            dueDate,
            completed: false,
            createdAt: now,
            lastModified: now,
            completedAt: None,
        }
    }
}

/// Trim the task text, rejecting empty or whitespace-only input
pub fn validateText(text: &str) -> EngineResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation("task text must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parse a `YYYY-MM-DD` due date at the boundary
pub fn parseDueDate(raw: &str) -> EngineResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| EngineError::Validation(format!("invalid due date: {}", raw)))
}

/// Drop empty or whitespace-only descriptions
pub fn normalizeDescription(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
