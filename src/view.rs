// Derived-view pipeline: search, filter, sort, group, summary
// Pure over explicit inputs so callers may cache the result however they like

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{FilterMode, SortMode, Summary, TaskRecord, TaskView, ViewState};

/// Compute the view the presentation layer consumes.
/// Applied in fixed order: search filter, mode filter, stable sort,
/// active/completed split. Summary counts always come from the full,
/// unfiltered collection.
pub fn computeView(tasks: &[TaskRecord], view: &ViewState, today: NaiveDate) -> TaskView {
    let query = view.searchQuery.to_lowercase();

    let mut filtered: Vec<TaskRecord> = tasks
        .iter()
        .filter(|t| matchesSearch(t, &query))
        .filter(|t| matchesFilter(t, view.filterMode, today))
        .cloned()
        .collect();

    // Vec::sort_by is stable: equal keys keep their pre-sort order
    filtered.sort_by(compareFor(view.sortMode));

    let (completedTasks, activeTasks): (Vec<TaskRecord>, Vec<TaskRecord>) =
        filtered.into_iter().partition(|t| t.completed);

    let total = tasks.len();
    let remaining = tasks.iter().filter(|t| !t.completed).count();

    TaskView {
        activeTasks,
        completedTasks,
        summary: Summary { remaining, completed: total - remaining, total },
        editingId: view.editingId.filter(|id| tasks.iter().any(|t| t.id == *id)),
    }
}

/// Case-insensitive substring over text and description.
/// An absent description never matches; an empty query matches everything.
fn matchesSearch(task: &TaskRecord, lowercaseQuery: &str) -> bool {
    if lowercaseQuery.is_empty() {
        return true;
    }
    if task.text.to_lowercase().contains(lowercaseQuery) {
        return true;
    }
    task.description
        .as_ref()
        .is_some_and(|d| d.to_lowercase().contains(lowercaseQuery))
}

fn matchesFilter(task: &TaskRecord, mode: FilterMode, today: NaiveDate) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Active => !task.completed,
        FilterMode::Completed => task.completed,
        // Due today regardless of completion
        FilterMode::DueToday => task.dueDate == Some(today),
        FilterMode::Overdue => {
            task.dueDate.is_some_and(|d| d < today) && !task.completed
        }
    }
}

fn compareFor(mode: SortMode) -> impl Fn(&TaskRecord, &TaskRecord) -> Ordering {
    move |a, b| match mode {
        SortMode::Default => b.lastModified.cmp(&a.lastModified),
        SortMode::DateAsc => compareDueDates(a, b, false),
        SortMode::DateDesc => compareDueDates(a, b, true),
        SortMode::AlphaAsc => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
        SortMode::AlphaDesc => b.text.to_lowercase().cmp(&a.text.to_lowercase()),
        SortMode::CreatedNewest => b.createdAt.cmp(&a.createdAt),
        SortMode::CreatedOldest => a.createdAt.cmp(&b.createdAt),
    }
}

/// Records with no due date sort after all dated records, regardless of
/// direction
fn compareDueDates(a: &TaskRecord, b: &TaskRecord, descending: bool) -> Ordering {
    match (a.dueDate, b.dueDate) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            if descending {
                y.cmp(&x)
            } else {
                x.cmp(&y)
            }
        }
    }
}
