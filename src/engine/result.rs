//! Result sets and their ownership
//!
//! A result set either borrows a shard's physical table unchanged or owns
//! records materialized during the query. The distinction drives release:
//! a borrowed set drops only its `Arc` reference and the shard table
//! outlives the query; an owned set's records are freed with the owning
//! context. Release logic is a single exhaustive match over this variant.

use std::sync::Arc;

use serde_json::Value;

use super::table::ShardTable;

/// An ordered collection of matched records
#[derive(Debug, Clone)]
pub enum ResultSet {
    /// Zero-copy alias to a shard's table; never released by the query
    Borrowed(Arc<ShardTable>),
    /// Records materialized by a selection, grouping, or sort
    Owned(Vec<Value>),
}

impl ResultSet {
    /// An owned result set with no records
    pub fn empty() -> Self {
        Self::Owned(Vec::new())
    }

    /// Returns the record count
    pub fn record_count(&self) -> usize {
        match self {
            Self::Borrowed(table) => table.len(),
            Self::Owned(records) => records.len(),
        }
    }

    /// Returns the records in result order
    pub fn records(&self) -> &[Value] {
        match self {
            Self::Borrowed(table) => table.records(),
            Self::Owned(records) => records,
        }
    }

    /// Returns true if this set aliases a shard table
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Returns true if no records matched
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
