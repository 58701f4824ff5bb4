//! Shard enumeration
//!
//! The enumerator is the seam to whatever catalogs a logical table's
//! physical partitions. Enumeration order is significant: it defines the
//! final result ordering.

use std::sync::Arc;

use crate::engine::ShardTable;
use crate::range::KeyRange;

/// One shard of a logical table: its physical table, the shard key field,
/// and the key span the shard covers
#[derive(Debug, Clone)]
pub struct Shard {
    /// The physical partition table
    pub table: Arc<ShardTable>,
    /// The field holding the shard key in each record
    pub key_field: String,
    /// The half-open key span this shard covers
    pub range: KeyRange,
}

impl Shard {
    pub fn new(table: Arc<ShardTable>, key_field: impl Into<String>, range: KeyRange) -> Self {
        Self {
            table,
            key_field: key_field.into(),
            range,
        }
    }
}

/// Produces the ordered shard list of a logical table
pub trait ShardEnumerator {
    /// Name of the logical table, for diagnostics
    fn logical_table(&self) -> &str;

    /// Name of the shard key field, for diagnostics
    fn shard_key(&self) -> &str;

    /// Ordered shards of the logical table; may legitimately be empty
    fn shards(&self) -> Vec<Shard>;
}

/// Enumerator over a fixed, ordered shard list
#[derive(Debug)]
pub struct StaticEnumerator {
    logical_table: String,
    shard_key: String,
    shards: Vec<Shard>,
}

impl StaticEnumerator {
    /// Creates an empty enumerator for a logical table
    pub fn new(logical_table: impl Into<String>, shard_key: impl Into<String>) -> Self {
        Self {
            logical_table: logical_table.into(),
            shard_key: shard_key.into(),
            shards: Vec::new(),
        }
    }

    /// Appends a shard; enumeration follows insertion order
    pub fn with_shard(mut self, table: Arc<ShardTable>, range: KeyRange) -> Self {
        let key_field = self.shard_key.clone();
        self.shards.push(Shard::new(table, key_field, range));
        self
    }
}

impl ShardEnumerator for StaticEnumerator {
    fn logical_table(&self) -> &str {
        &self.logical_table
    }

    fn shard_key(&self) -> &str {
        &self.shard_key
    }

    fn shards(&self) -> Vec<Shard> {
        self.shards.clone()
    }
}
