// Common types for the taskdeck engine
// All fields use camelCase for direct JSON compatibility

use serde::{Deserialize, Serialize};

/// Common result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine-level errors. All are local and recoverable; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
    /// Empty task text or malformed due date, rejected before any state changes
    Validation(String),
    /// Operation referenced an id that is not in the collection
    NotFound(String),
    /// Storage medium failed on save; the in-memory mutation is kept
    Persistence(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Validation(msg) => write!(f, "Validation error: {}", msg),
            EngineError::NotFound(msg) => write!(f, "Not found: {}", msg),
            EngineError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

/// Filter mode applied on top of the search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
    DueToday,
    Overdue,
}

impl FilterMode {
    pub fn fromName(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "due-today" => Some(Self::DueToday),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::DueToday => "due-today",
            Self::Overdue => "overdue",
        }
    }
}

/// Sort mode applied to the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Most recently modified first
    #[default]
    Default,
    DateAsc,
    DateDesc,
    AlphaAsc,
    AlphaDesc,
    CreatedNewest,
    CreatedOldest,
}

impl SortMode {
    pub fn fromName(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "date-asc" => Some(Self::DateAsc),
            "date-desc" => Some(Self::DateDesc),
            "alpha-asc" => Some(Self::AlphaAsc),
            "alpha-desc" => Some(Self::AlphaDesc),
            "created-newest" => Some(Self::CreatedNewest),
            "created-oldest" => Some(Self::CreatedOldest),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
            Self::AlphaAsc => "alpha-asc",
            Self::AlphaDesc => "alpha-desc",
            Self::CreatedNewest => "created-newest",
            Self::CreatedOldest => "created-oldest",
        }
    }
}
