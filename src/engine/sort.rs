//! Deterministic sorting with pagination windows
//!
//! Sorts are stable, multi-key, and strictly ordered by the engine's JSON
//! value ordering. A sort window applies offset/limit as part of the sort
//! operation; the same window logic is reused when an output layer
//! paginates an unsorted table.

use serde_json::Value;

use super::errors::{EngineError, EngineResult};
use super::value::compare_fields;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sort key: field plus direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses `"field"`, `"+field"`, or `"-field"`.
    ///
    /// A leading `-` selects descending order, a leading `+` ascending.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(field) => Self::desc(field.trim()),
            None => Self::asc(raw.strip_prefix('+').unwrap_or(raw).trim()),
        }
    }
}

/// Sorts records by the given keys, then applies the window.
///
/// The sort is stable: records equal under every key keep their input
/// order. Fails if any sort key has a blank field.
pub fn sort_window(
    records: &[Value],
    keys: &[SortKey],
    offset: i64,
    limit: i64,
) -> EngineResult<Vec<Value>> {
    for key in keys {
        if key.field.is_empty() {
            return Err(EngineError::sort_failed("blank sort field"));
        }
    }

    let mut sorted: Vec<Value> = records.to_vec();
    sorted.sort_by(|a, b| {
        for key in keys {
            let ordering = compare_fields(a.get(&key.field), b.get(&key.field));
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != std::cmp::Ordering::Equal {
                return ordering;
            }
        }
        std::cmp::Ordering::Equal
    });

    Ok(apply_window(sorted, offset, limit))
}

/// Applies an offset/limit window to a record list.
///
/// A negative offset clamps to 0; an offset past the end yields an empty
/// page; a negative limit means "all remaining".
pub fn apply_window(records: Vec<Value>, offset: i64, limit: i64) -> Vec<Value> {
    let start = offset.max(0) as usize;
    if start >= records.len() {
        return Vec::new();
    }

    let mut windowed: Vec<Value> = records.into_iter().skip(start).collect();
    if limit >= 0 {
        windowed.truncate(limit as usize);
    }
    windowed
}
