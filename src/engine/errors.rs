//! Engine error types
//!
//! Failures surfaced by the storage and expression primitives. They are
//! never retried; callers propagate them unmodified.

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by selection, grouping, and sorting primitives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Selection could not evaluate the expression
    #[error("selection failed: {reason}")]
    SelectionFailed { reason: String },

    /// Grouping could not aggregate on the requested key
    #[error("grouping failed on key <{key}>: {reason}")]
    GroupingFailed { key: String, reason: String },

    /// Sorting could not order by the requested keys
    #[error("sort failed: {reason}")]
    SortFailed { reason: String },
}

impl EngineError {
    /// Create a selection failure
    pub fn selection_failed(reason: impl Into<String>) -> Self {
        Self::SelectionFailed {
            reason: reason.into(),
        }
    }

    /// Create a grouping failure for a drilldown key
    pub fn grouping_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GroupingFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a sort failure
    pub fn sort_failed(reason: impl Into<String>) -> Self {
        Self::SortFailed {
            reason: reason.into(),
        }
    }
}
