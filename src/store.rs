// Authoritative task collection and the mutation surface
// Single-writer model: state lives behind RwLocks so the whole surface
// works through &self, matching how the storage state is shared out

use chrono::{DateTime, Local, NaiveDate, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::models::{
    EngineError, EngineResult, FilterMode, SortMode, TaskRecord, TaskView, ViewState,
    normalizeDescription, validateText,
};
use crate::storage::PersistenceAdapter;
use crate::view::computeView;

// ============================================
// CLOCK
// ============================================

/// Injected time source; tests drive it manually
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    /// Today's calendar date. "Due today" follows the user's local
    /// calendar, not UTC.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

// ============================================
// TASK STORE
// ============================================

/// Owns the authoritative collection. Every mutation updates the in-memory
/// collection first, then persists the whole collection through the adapter;
/// a failed save surfaces as `EngineError::Persistence` while the in-memory
/// mutation is kept, so the caller can warn the user.
pub struct TaskStore {
    tasks: RwLock<Vec<TaskRecord>>,
    view: RwLock<ViewState>,
    adapter: PersistenceAdapter,
    clock: Box<dyn Clock>,
    lastId: RwLock<i64>,
}

impl TaskStore {
    /// Load the collection from the adapter and seed the id counter
    pub fn new(adapter: PersistenceAdapter, clock: Box<dyn Clock>) -> Self {
        let tasks = adapter.load();
        let lastId = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        debug!(count = tasks.len(), "task store loaded");

        Self {
            tasks: RwLock::new(tasks),
            view: RwLock::new(ViewState::default()),
            adapter,
            clock,
            lastId: RwLock::new(lastId),
        }
    }

    /// Store backed by the wall clock
    pub fn withSystemClock(adapter: PersistenceAdapter) -> Self {
        Self::new(adapter, Box::new(SystemClock))
    }

    /// Creation-time millisecond id, bumped past the previous one so ids
    /// stay strictly monotonic even when the clock does not move
    fn nextId(&self) -> i64 {
        let nowMs = self.clock.now().timestamp_millis();
        let mut last = self.lastId.write();
        *last = nowMs.max(*last + 1);
        *last
    }

    fn persist(&self) -> EngineResult<()> {
        let tasks = self.tasks.read();
        self.adapter.save(&tasks)
    }

    // ============================================
    // MUTATIONS
    // ============================================

    pub fn create(
        &self,
        text: &str,
        description: Option<String>,
        dueDate: Option<NaiveDate>,
    ) -> EngineResult<TaskRecord> {
        let text = validateText(text)?;
        let record = TaskRecord::new(
            self.nextId(),
            text,
            normalizeDescription(description),
            dueDate,
            self.clock.now(),
        );

        self.tasks.write().push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Replace text/description/dueDate; completion state is untouched.
    /// Also the submit path for an edit session: a task deleted since
    /// `beginEdit` surfaces here as `NotFound`.
    pub fn update(
        &self,
        id: i64,
        text: &str,
        description: Option<String>,
        dueDate: Option<NaiveDate>,
    ) -> EngineResult<TaskRecord> {
        let updated = {
            let mut tasks = self.tasks.write();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| EngineError::NotFound(format!("no task with id {}", id)))?;

            task.text = validateText(text)?;
            task.description = normalizeDescription(description);
            task.dueDate = dueDate;
            task.lastModified = self.clock.now();
            task.clone()
        };

        self.persist()?;
        Ok(updated)
    }

    pub fn toggleComplete(&self, id: i64) -> EngineResult<TaskRecord> {
        let toggled = {
            let mut tasks = self.tasks.write();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| EngineError::NotFound(format!("no task with id {}", id)))?;

            let now = self.clock.now();
            task.completed = !task.completed;
            task.completedAt = if task.completed { Some(now) } else { None };
            task.lastModified = now;
            task.clone()
        };

        self.persist()?;
        Ok(toggled)
    }

    /// Remove one task. A missing id is an error, consistent with
    /// `update`/`toggleComplete`.
    pub fn delete(&self, id: i64) -> EngineResult<()> {
        {
            let mut tasks = self.tasks.write();
            let index = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| EngineError::NotFound(format!("no task with id {}", id)))?;
            tasks.remove(index);
        }

        // Deleting the task under edit invalidates the edit session
        let mut view = self.view.write();
        if view.editingId == Some(id) {
            view.editingId = None;
        }
        drop(view);

        self.persist()
    }

    /// Remove every completed task; one save for the whole batch.
    /// Returns how many were removed.
    pub fn clearCompleted(&self) -> EngineResult<usize> {
        let removed = {
            let mut tasks = self.tasks.write();
            let before = tasks.len();
            tasks.retain(|t| !t.completed);

            let mut view = self.view.write();
            if let Some(id) = view.editingId
                && !tasks.iter().any(|t| t.id == id)
            {
                view.editingId = None;
            }

            before - tasks.len()
        };

        if removed == 0 {
            return Ok(0);
        }

        debug!(removed, "cleared completed tasks");
        self.persist()?;
        Ok(removed)
    }

    // ============================================
    // READS
    // ============================================

    /// Snapshot of the current records; mutating the snapshot never
    /// touches the authoritative collection
    pub fn list(&self) -> Vec<TaskRecord> {
        self.tasks.read().clone()
    }

    /// Derived view over the current collection and view-state
    pub fn computeView(&self) -> TaskView {
        let tasks = self.tasks.read();
        let view = self.view.read();
        computeView(&tasks, &view, self.clock.today())
    }

    // ============================================
    // VIEW-STATE
    // ============================================

    pub fn setSearchQuery(&self, query: &str) {
        self.view.write().searchQuery = query.to_string();
    }

    pub fn setFilterMode(&self, mode: FilterMode) {
        self.view.write().filterMode = mode;
    }

    pub fn setSortMode(&self, mode: SortMode) {
        self.view.write().sortMode = mode;
    }

    /// Start an edit session for an existing task
    pub fn beginEdit(&self, id: i64) -> EngineResult<()> {
        if !self.tasks.read().iter().any(|t| t.id == id) {
            return Err(EngineError::NotFound(format!("no task with id {}", id)));
        }
        self.view.write().editingId = Some(id);
        Ok(())
    }

    pub fn cancelEdit(&self) {
        self.view.write().editingId = None;
    }

    /// The task under edit, revalidated against the live collection
    pub fn editingTask(&self) -> Option<TaskRecord> {
        let id = self.view.read().editingId?;
        self.tasks.read().iter().find(|t| t.id == id).cloned()
    }

    /// Current transient view-state
    pub fn viewState(&self) -> ViewState {
        self.view.read().clone()
    }
}

// ============================================
// TESTS
// ============================================
