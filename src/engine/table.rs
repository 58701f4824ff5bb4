//! In-memory shard tables
//!
//! A shard table holds the records of one physical partition. Tables are
//! immutable once built and shared read-only via `Arc` for the duration of
//! any query touching them; the search kernel never mutates one.

use std::sync::Arc;

use serde_json::Value;

use super::errors::EngineResult;
use super::expression::SelectionExpr;

/// One physical partition of a logical table
#[derive(Debug)]
pub struct ShardTable {
    name: String,
    records: Vec<Value>,
}

impl ShardTable {
    /// Builds a shared table from its records
    pub fn new(name: impl Into<String>, records: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            records,
        })
    }

    /// Returns the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record count
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns the records in table order
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Selects records matching the expression into a new owned batch.
    ///
    /// Record order is preserved. The table itself is left untouched.
    pub fn select(&self, expr: &SelectionExpr) -> EngineResult<Vec<Value>> {
        expr.validate()?;
        Ok(self
            .records
            .iter()
            .filter(|record| expr.matches(record))
            .cloned()
            .collect())
    }
}
