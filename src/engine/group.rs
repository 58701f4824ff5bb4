//! Count-only grouping
//!
//! A `GroupAccumulator` folds result sets into per-group record counts for
//! one group key. It tracks every distinct group it sees (pagination is
//! applied later, to the extracted table, never here) and preserves
//! first-seen group order so aggregation stays deterministic for a fixed
//! feed order. Records without the group field count under the JSON null
//! group.

use std::collections::HashMap;

use serde_json::{json, Value};

use super::errors::{EngineError, EngineResult};
use super::result::ResultSet;

/// Per-group record counting for one drilldown key
#[derive(Debug)]
pub struct GroupAccumulator {
    key_field: String,
    /// Canonical JSON text of a group key -> index into `groups`
    index: HashMap<String, usize>,
    /// (group key, count) in first-seen order
    groups: Vec<(Value, u64)>,
}

impl GroupAccumulator {
    /// Creates an accumulator for one group key
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Returns the group key field name
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Returns the number of distinct groups seen so far
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Folds one result set into the running counts.
    ///
    /// Call once per accumulated search result set, in order.
    pub fn accumulate(&mut self, result_set: &ResultSet) -> EngineResult<()> {
        if self.key_field.trim().is_empty() {
            return Err(EngineError::grouping_failed(
                self.key_field.clone(),
                "blank group key",
            ));
        }

        for record in result_set.records() {
            let key = record.get(&self.key_field).cloned().unwrap_or(Value::Null);
            let canonical = key.to_string();
            match self.index.get(&canonical) {
                Some(&slot) => self.groups[slot].1 += 1,
                None => {
                    self.index.insert(canonical, self.groups.len());
                    self.groups.push((key, 1));
                }
            }
        }
        Ok(())
    }

    /// Extracts the grouped table: one `{"_key", "_nsubrecs"}` row per
    /// group, in first-seen order. Consumes the accumulator.
    pub fn into_result_set(self) -> ResultSet {
        let records = self
            .groups
            .into_iter()
            .map(|(key, count)| json!({"_key": key, "_nsubrecs": count}))
            .collect();
        ResultSet::Owned(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn owned(records: Vec<Value>) -> ResultSet {
        ResultSet::Owned(records)
    }

    #[test]
    fn test_counts_across_result_sets() {
        let mut acc = GroupAccumulator::new("category");

        acc.accumulate(&owned(vec![
            json!({"category": "app"}),
            json!({"category": "db"}),
        ]))
        .unwrap();
        acc.accumulate(&owned(vec![
            json!({"category": "app"}),
            json!({"category": "app"}),
        ]))
        .unwrap();

        let grouped = acc.into_result_set();
        let records = grouped.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], json!({"_key": "app", "_nsubrecs": 3}));
        assert_eq!(records[1], json!({"_key": "db", "_nsubrecs": 1}));
    }

    #[test]
    fn test_first_seen_order() {
        let mut acc = GroupAccumulator::new("category");
        acc.accumulate(&owned(vec![
            json!({"category": "z"}),
            json!({"category": "a"}),
            json!({"category": "z"}),
        ]))
        .unwrap();

        let records_owned = acc.into_result_set();
        let records = records_owned.records();
        assert_eq!(records[0]["_key"], json!("z"));
        assert_eq!(records[1]["_key"], json!("a"));
    }

    #[test]
    fn test_missing_field_counts_under_null() {
        let mut acc = GroupAccumulator::new("category");
        acc.accumulate(&owned(vec![
            json!({"category": "app"}),
            json!({"other": 1}),
            json!({"category": null}),
        ]))
        .unwrap();

        let grouped = acc.into_result_set();
        let records = grouped.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], json!({"_key": null, "_nsubrecs": 2}));
    }

    #[test]
    fn test_numeric_group_keys() {
        let mut acc = GroupAccumulator::new("code");
        acc.accumulate(&owned(vec![
            json!({"code": 200}),
            json!({"code": 500}),
            json!({"code": 200}),
        ]))
        .unwrap();

        assert_eq!(acc.n_groups(), 2);
        let grouped = acc.into_result_set();
        assert_eq!(grouped.records()[0], json!({"_key": 200, "_nsubrecs": 2}));
    }

    #[test]
    fn test_blank_key_is_grouping_failure() {
        let mut acc = GroupAccumulator::new("");
        let err = acc.accumulate(&owned(vec![json!({"a": 1})])).unwrap_err();
        assert!(matches!(err, EngineError::GroupingFailed { .. }));
    }

    #[test]
    fn test_empty_result_set_adds_nothing() {
        let mut acc = GroupAccumulator::new("category");
        acc.accumulate(&ResultSet::empty()).unwrap();
        assert_eq!(acc.n_groups(), 0);
    }
}
