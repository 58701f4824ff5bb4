//! Query orchestration
//!
//! Drives one query: the search phase populates the context's result-set
//! list in shard enumeration order; the drilldown phase then aggregates
//! grouped counts across that list. Both phases log through observation
//! scopes, so an early error still leaves a terminal event.

use crate::engine::{sort_window, GroupAccumulator, ResultSet, SelectionExpr};
use crate::observability::ObservationScope;
use crate::range::TargetRange;

use super::context::ExecuteContext;
use super::enumerator::ShardEnumerator;
use super::errors::{SearchError, SearchResult};
use super::shard::ShardExecutor;

/// Executes one query against a logical table
pub struct SearchExecutor<'a, E: ShardEnumerator> {
    enumerator: &'a E,
    target: TargetRange,
    filter: Option<SelectionExpr>,
}

impl<'a, E: ShardEnumerator> SearchExecutor<'a, E> {
    pub fn new(enumerator: &'a E, target: TargetRange) -> Self {
        Self {
            enumerator,
            target,
            filter: None,
        }
    }

    /// Sets the record filter applied on top of the range conditions
    pub fn with_filter(mut self, filter: SelectionExpr) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Runs the search phase, then the drilldown phase
    pub fn execute(&self, ctx: &mut ExecuteContext) -> SearchResult<()> {
        self.execute_search(ctx)?;
        self.execute_drilldown(ctx)?;
        Ok(())
    }

    fn execute_search(&self, ctx: &mut ExecuteContext) -> SearchResult<()> {
        let query_id = ctx.query_id().to_string();
        let scope = ObservationScope::with_fields(
            "SEARCH",
            &[
                ("logical_table", self.enumerator.logical_table()),
                ("query_id", query_id.as_str()),
            ],
        );

        let mut observed_any = false;
        for shard in self.enumerator.shards() {
            observed_any = true;
            // An empty shard can never match; skip it without classifying
            if shard.table.is_empty() {
                continue;
            }

            ShardExecutor::new(&shard, &self.target, self.filter.as_ref()).execute(ctx)?;
        }

        if !observed_any {
            let err = SearchError::NoShards {
                logical_table: self.enumerator.logical_table().to_string(),
                shard_key: self.enumerator.shard_key().to_string(),
            };
            scope.fail(&err.to_string());
            return Err(err);
        }

        if ctx.result_sets.is_empty() {
            // Shards existed but nothing matched; keep one empty set so
            // downstream consumers still have something to report zero
            // hits against
            ctx.result_sets.push(ResultSet::empty());
        }

        let n_result_sets = ctx.result_sets.len().to_string();
        scope.complete_with_fields(&[("n_result_sets", n_result_sets.as_str())]);
        Ok(())
    }

    fn execute_drilldown(&self, ctx: &mut ExecuteContext) -> SearchResult<()> {
        if ctx.drilldown.keys().is_empty() {
            return Ok(());
        }

        let query_id = ctx.query_id().to_string();
        let scope = ObservationScope::with_fields(
            "DRILLDOWN",
            &[
                ("logical_table", self.enumerator.logical_table()),
                ("query_id", query_id.as_str()),
            ],
        );

        let keys = ctx.drilldown.keys().to_vec();
        let sort_keys = ctx.drilldown.sort_keys().to_vec();
        let offset = ctx.drilldown.offset();
        let limit = ctx.drilldown.limit();

        for key in &keys {
            // A fresh accumulator per key; its transient buffers must not
            // leak into the next key's aggregation
            let mut accumulator = GroupAccumulator::new(key.clone());
            for result_set in &ctx.result_sets {
                accumulator.accumulate(result_set)?;
            }
            let grouped = accumulator.into_result_set();

            if sort_keys.is_empty() {
                ctx.drilldown.result_sets.push(grouped);
            } else {
                let sorted = sort_window(grouped.records(), &sort_keys, offset, limit)?;
                ctx.drilldown.result_sets.push(ResultSet::Owned(sorted));
                // The sorted table is already paginated; keep the full
                // grouped table so the true group total stays reportable
                ctx.drilldown.unsorted_result_sets.push(grouped);
            }
        }

        let n_drilldowns = ctx.drilldown.result_sets.len().to_string();
        scope.complete_with_fields(&[("n_drilldowns", n_drilldowns.as_str())]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Predicate, ShardTable};
    use crate::range::{Border, KeyRange};
    use crate::search::context::DrilldownRequest;
    use crate::search::enumerator::StaticEnumerator;
    use serde_json::json;
    use std::sync::Arc;

    fn day_range(day: u32) -> KeyRange {
        KeyRange::new(
            json!(format!("2024-01-{day:02} 00:00:00")),
            json!(format!("2024-01-{:02} 00:00:00", day + 1)),
        )
    }

    fn day_table(day: u32, categories: &[&str]) -> Arc<ShardTable> {
        let records = categories
            .iter()
            .enumerate()
            .map(|(hour, category)| {
                json!({
                    "timestamp": format!("2024-01-{day:02} {:02}:00:00", hour + 1),
                    "category": category,
                })
            })
            .collect();
        ShardTable::new(format!("logs_202401{day:02}"), records)
    }

    fn target(min_day: u32, max_day: u32) -> TargetRange {
        TargetRange::unbounded()
            .with_min(json!(format!("2024-01-{min_day:02} 00:00:00")), Border::Include)
            .with_max(json!(format!("2024-01-{max_day:02} 00:00:00")), Border::Exclude)
    }

    #[test]
    fn test_no_shards_is_invalid_argument() {
        let enumerator = StaticEnumerator::new("logs", "timestamp");
        let mut ctx = ExecuteContext::new(DrilldownRequest::none());

        let err = SearchExecutor::new(&enumerator, TargetRange::unbounded())
            .execute(&mut ctx)
            .unwrap_err();

        assert_eq!(
            err,
            SearchError::NoShards {
                logical_table: "logs".to_string(),
                shard_key: "timestamp".to_string(),
            }
        );
        assert!(ctx.result_sets().is_empty());
    }

    #[test]
    fn test_all_empty_shards_synthesize_one_empty_result_set() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(ShardTable::new("logs_20240101", vec![]), day_range(1));
        let mut ctx = ExecuteContext::new(DrilldownRequest::none());

        SearchExecutor::new(&enumerator, TargetRange::unbounded())
            .execute(&mut ctx)
            .unwrap();

        assert_eq!(ctx.result_sets().len(), 1);
        assert_eq!(ctx.result_sets()[0].record_count(), 0);
        assert!(!ctx.result_sets()[0].is_borrowed());
    }

    #[test]
    fn test_range_excluded_shards_synthesize_one_empty_result_set() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(1, &["app"]), day_range(1));
        let mut ctx = ExecuteContext::new(DrilldownRequest::none());

        SearchExecutor::new(&enumerator, target(5, 6))
            .execute(&mut ctx)
            .unwrap();

        assert_eq!(ctx.result_sets().len(), 1);
        assert_eq!(ctx.result_sets()[0].record_count(), 0);
    }

    #[test]
    fn test_hits_sum_across_shards_in_enumeration_order() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(1, &["app", "db"]), day_range(1))
            .with_shard(day_table(2, &["app"]), day_range(2))
            .with_shard(day_table(3, &["db", "db", "app"]), day_range(3));
        let mut ctx = ExecuteContext::new(DrilldownRequest::none());

        SearchExecutor::new(&enumerator, target(2, 4))
            .execute(&mut ctx)
            .unwrap();

        // day1 excluded; day2 and day3 fully covered
        assert_eq!(ctx.result_sets().len(), 2);
        let total: usize = ctx.result_sets().iter().map(ResultSet::record_count).sum();
        assert_eq!(total, 4);
        // Enumeration order preserved
        assert_eq!(
            ctx.result_sets()[0].records()[0]["timestamp"],
            json!("2024-01-02 01:00:00")
        );
        assert_eq!(
            ctx.result_sets()[1].records()[0]["timestamp"],
            json!("2024-01-03 01:00:00")
        );
    }

    #[test]
    fn test_empty_shard_skipped_but_counts_as_observed() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(ShardTable::new("logs_20240101", vec![]), day_range(1))
            .with_shard(day_table(2, &["app"]), day_range(2));
        let mut ctx = ExecuteContext::new(DrilldownRequest::none());

        SearchExecutor::new(&enumerator, target(1, 3))
            .execute(&mut ctx)
            .unwrap();

        assert_eq!(ctx.result_sets().len(), 1);
        assert_eq!(ctx.result_sets()[0].record_count(), 1);
    }

    #[test]
    fn test_filter_applies_on_top_of_range() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(2, &["app", "db", "app"]), day_range(2));
        let mut ctx = ExecuteContext::new(DrilldownRequest::none());

        SearchExecutor::new(&enumerator, target(2, 3))
            .with_filter(SelectionExpr::match_all().and(Predicate::eq("category", json!("app"))))
            .execute(&mut ctx)
            .unwrap();

        assert_eq!(ctx.result_sets()[0].record_count(), 2);
        assert!(!ctx.result_sets()[0].is_borrowed());
    }

    #[test]
    fn test_drilldown_counts_across_shards() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(2, &["app", "db"]), day_range(2))
            .with_shard(day_table(3, &["app", "app"]), day_range(3));
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            ..DrilldownRequest::none()
        };
        let mut ctx = ExecuteContext::new(request);

        SearchExecutor::new(&enumerator, target(2, 4))
            .execute(&mut ctx)
            .unwrap();

        let drilldowns = ctx.drilldown().result_sets();
        assert_eq!(drilldowns.len(), 1);
        assert_eq!(
            drilldowns[0].records(),
            &[
                json!({"_key": "app", "_nsubrecs": 3}),
                json!({"_key": "db", "_nsubrecs": 1}),
            ]
        );
        // No sort requested: nothing retained unsorted
        assert!(ctx.drilldown().unsorted_result_sets().is_empty());
    }

    #[test]
    fn test_drilldown_multiple_keys_in_order() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(2, &["app", "db"]), day_range(2));
        let request = DrilldownRequest {
            keys: Some("category, timestamp".to_string()),
            ..DrilldownRequest::none()
        };
        let mut ctx = ExecuteContext::new(request);

        SearchExecutor::new(&enumerator, target(2, 3))
            .execute(&mut ctx)
            .unwrap();

        let drilldowns = ctx.drilldown().result_sets();
        assert_eq!(drilldowns.len(), 2);
        // First output grouped by category, second by timestamp
        assert_eq!(drilldowns[0].record_count(), 2);
        assert_eq!(drilldowns[1].record_count(), 2);
        assert_eq!(drilldowns[0].records()[0]["_key"], json!("app"));
        assert_eq!(
            drilldowns[1].records()[0]["_key"],
            json!("2024-01-02 01:00:00")
        );
    }

    #[test]
    fn test_drilldown_sorted_retains_unsorted_table() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(2, &["app", "db", "db", "net"]), day_range(2));
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            sort_keys: Some("-_nsubrecs".to_string()),
            limit: Some(2),
            ..DrilldownRequest::none()
        };
        let mut ctx = ExecuteContext::new(request);

        SearchExecutor::new(&enumerator, target(2, 3))
            .execute(&mut ctx)
            .unwrap();

        let sorted = &ctx.drilldown().result_sets()[0];
        assert_eq!(sorted.record_count(), 2);
        assert_eq!(sorted.records()[0]["_key"], json!("db"));

        // The unsorted grouped table keeps the full group set
        let unsorted = &ctx.drilldown().unsorted_result_sets()[0];
        assert_eq!(unsorted.record_count(), 3);
    }

    #[test]
    fn test_drilldown_over_borrowed_result_set() {
        // All-covered shard with no filter feeds the borrowed table into
        // the accumulator directly
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(2, &["app", "app", "db"]), day_range(2));
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            ..DrilldownRequest::none()
        };
        let mut ctx = ExecuteContext::new(request);

        SearchExecutor::new(&enumerator, target(2, 3))
            .execute(&mut ctx)
            .unwrap();

        assert!(ctx.result_sets()[0].is_borrowed());
        assert_eq!(
            ctx.drilldown().result_sets()[0].records()[0],
            json!({"_key": "app", "_nsubrecs": 2})
        );
    }

    #[test]
    fn test_blank_sort_field_fails_and_context_survives() {
        let enumerator = StaticEnumerator::new("logs", "timestamp")
            .with_shard(day_table(2, &["app"]), day_range(2));
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            // "-" parses to a blank descending field
            sort_keys: Some("-".to_string()),
            ..DrilldownRequest::none()
        };
        let mut ctx = ExecuteContext::new(request);

        let err = SearchExecutor::new(&enumerator, target(2, 3))
            .execute(&mut ctx)
            .unwrap_err();
        assert!(matches!(err, SearchError::Engine(_)));

        // The search-phase result set is still owned by the context and
        // dropped with it
        assert_eq!(ctx.result_sets().len(), 1);
    }
}
