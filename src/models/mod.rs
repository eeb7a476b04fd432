// Models module for the taskdeck engine
// All fields use camelCase for consistency

pub mod common;
pub mod task;
pub mod view;

pub use common::{EngineError, EngineResult, FilterMode, SortMode};
pub use task::{TaskRecord, normalizeDescription, parseDueDate, validateText};
pub use view::{Summary, TaskView, ViewState};
