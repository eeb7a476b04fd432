// Transient view-state and the derived view structures
// View-state is never persisted; the derived view is recomputed on demand

use serde::{Deserialize, Serialize};

use super::common::{FilterMode, SortMode};
use super::task::TaskRecord;

/// Transient parameters controlling search, filter, sort and edit session
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewState {
    pub searchQuery: String,
    pub filterMode: FilterMode,
    pub sortMode: SortMode,
    /// Weak reference to a task being edited; revalidated against the
    /// live collection before use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editingId: Option<i64>,
}

/// Summary counts over the full, unfiltered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub remaining: usize,
    pub completed: usize,
    pub total: usize,
}

/// The derived view consumed by the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskView {
    pub activeTasks: Vec<TaskRecord>,
    pub completedTasks: Vec<TaskRecord>,
    pub summary: Summary,
    /// `ViewState::editingId` with dangling ids dropped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editingId: Option<i64>,
}
