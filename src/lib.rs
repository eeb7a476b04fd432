// Allow non-snake_case names for JSON serialization compatibility with the
// persisted storage format (all field names are camelCase)
#![allow(non_snake_case)]

pub mod classify;
pub mod models;
pub mod storage;
pub mod store;
pub mod view;

pub use classify::{DueBadge, DueBucket, PriorityLevel, classifyDueDate, priorityLevel, relativeAge};
pub use models::{
    EngineError, EngineResult, FilterMode, SortMode, Summary, TaskRecord, TaskView, ViewState,
};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceAdapter, TASKS_KEY};
pub use store::{Clock, SystemClock, TaskStore};
pub use view::computeView;
