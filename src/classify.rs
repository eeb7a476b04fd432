// Due-date classification for display
// Pure functions: "today"/"now" always passed in, so no real clock in tests

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Due-date display category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DueBucket {
    #[default]
    None,
    Today,
    Tomorrow,
    Overdue,
    Upcoming,
}

/// Call-to-action level derived from the due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

/// Bucket plus the badge text the presentation layer shows for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueBadge {
    pub bucket: DueBucket,
    pub displayText: String,
}

/// Classify a due date against today's calendar date.
/// A completed task with a past due date is Upcoming, never Overdue:
/// overdue is a call-to-action signal, only relevant while incomplete.
pub fn classifyDueDate(dueDate: Option<NaiveDate>, today: NaiveDate, completed: bool) -> DueBadge {
    let due = match dueDate {
        Some(d) => d,
        None => {
            return DueBadge { bucket: DueBucket::None, displayText: String::new() };
        }
    };

    if due == today {
        return DueBadge { bucket: DueBucket::Today, displayText: "Today".to_string() };
    }
    if due == today + Duration::days(1) {
        return DueBadge { bucket: DueBucket::Tomorrow, displayText: "Tomorrow".to_string() };
    }
    if due < today && !completed {
        return DueBadge { bucket: DueBucket::Overdue, displayText: formatDate(due, today) };
    }
    DueBadge { bucket: DueBucket::Upcoming, displayText: formatDate(due, today) }
}

/// Short date text, with the year only when it differs from today's
fn formatDate(date: NaiveDate, today: NaiveDate) -> String {
    if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// Priority from whole calendar-day distance to the due date.
/// Completed tasks and tasks with no deadline carry no priority.
pub fn priorityLevel(dueDate: Option<NaiveDate>, today: NaiveDate, completed: bool) -> PriorityLevel {
    let due = match dueDate {
        Some(d) if !completed => d,
        _ => return PriorityLevel::None,
    };

    let diffDays = (due - today).num_days();
    if diffDays < 0 {
        PriorityLevel::High
    } else if diffDays == 0 {
        PriorityLevel::Medium
    } else if diffDays <= 2 {
        PriorityLevel::Low
    } else {
        PriorityLevel::None
    }
}

/// Bucket elapsed time into a short "ago" string
pub fn relativeAge(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }

    let weeks = days / 7;
    if weeks < 4 {
        return format!("{}w ago", weeks);
    }

    // 30-day months
    format!("{}mo ago", days / 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2026, 8, 29)
    }

    #[test]
    fn no_due_date_is_none_bucket() {
        let badge = classifyDueDate(None, today(), false);
        assert_eq!(badge.bucket, DueBucket::None);
        assert!(badge.displayText.is_empty());
    }

    #[test]
    fn today_and_tomorrow_buckets() {
        let badge = classifyDueDate(Some(today()), today(), false);
        assert_eq!(badge.bucket, DueBucket::Today);
        assert_eq!(badge.displayText, "Today");

        let badge = classifyDueDate(Some(day(2026, 8, 30)), today(), false);
        assert_eq!(badge.bucket, DueBucket::Tomorrow);
        assert_eq!(badge.displayText, "Tomorrow");
    }

    #[test]
    fn past_due_incomplete_is_overdue() {
        let badge = classifyDueDate(Some(day(2026, 8, 28)), today(), false);
        assert_eq!(badge.bucket, DueBucket::Overdue);
        assert_eq!(badge.displayText, "Aug 28");
    }

    #[test]
    fn past_due_completed_is_upcoming_not_overdue() {
        let badge = classifyDueDate(Some(day(2026, 8, 20)), today(), true);
        assert_eq!(badge.bucket, DueBucket::Upcoming);
    }

    #[test]
    fn future_date_is_upcoming_with_year_when_it_differs() {
        let badge = classifyDueDate(Some(day(2026, 9, 15)), today(), false);
        assert_eq!(badge.bucket, DueBucket::Upcoming);
        assert_eq!(badge.displayText, "Sep 15");

        let badge = classifyDueDate(Some(day(2027, 1, 2)), today(), false);
        assert_eq!(badge.displayText, "Jan 2, 2027");
    }

    #[test]
    fn today_bucket_wins_over_completion_state() {
        // Due today stays Today even when completed
        let badge = classifyDueDate(Some(today()), today(), true);
        assert_eq!(badge.bucket, DueBucket::Today);
    }

    #[test]
    fn priority_boundaries() {
        assert_eq!(priorityLevel(Some(day(2026, 8, 28)), today(), false), PriorityLevel::High);
        assert_eq!(priorityLevel(Some(today()), today(), false), PriorityLevel::Medium);
        assert_eq!(priorityLevel(Some(day(2026, 8, 30)), today(), false), PriorityLevel::Low);
        assert_eq!(priorityLevel(Some(day(2026, 8, 31)), today(), false), PriorityLevel::Low);
        assert_eq!(priorityLevel(Some(day(2026, 9, 1)), today(), false), PriorityLevel::None);
    }

    #[test]
    fn priority_is_none_when_completed_or_undated() {
        assert_eq!(priorityLevel(Some(day(2026, 8, 1)), today(), true), PriorityLevel::None);
        assert_eq!(priorityLevel(None, today(), false), PriorityLevel::None);
    }

    #[test]
    fn relative_age_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        let ago = |secs: i64| relativeAge(now - Duration::seconds(secs), now);

        assert_eq!(ago(0), "just now");
        assert_eq!(ago(59), "just now");
        assert_eq!(ago(60), "1m ago");
        assert_eq!(ago(59 * 60), "59m ago");
        assert_eq!(ago(60 * 60), "1h ago");
        assert_eq!(ago(23 * 3600), "23h ago");
        assert_eq!(ago(24 * 3600), "1d ago");
        assert_eq!(ago(6 * 86400), "6d ago");
        assert_eq!(ago(7 * 86400), "1w ago");
        assert_eq!(ago(27 * 86400), "3w ago");
        assert_eq!(ago(60 * 86400), "2mo ago");
    }

    #[test]
    fn relative_age_clamps_future_timestamps() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        assert_eq!(relativeAge(now + Duration::seconds(30), now), "just now");
    }
}
