//! Response assembly
//!
//! Folds a completed execution context into the value an output layer
//! serializes: the total hit count, the merged main records projected
//! through an output column list, and one block per drilldown key with
//! its output window applied. Wire formats stay outside this crate.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::engine::apply_window;
use crate::search::ExecuteContext;

/// Default column list for main records
pub const DEFAULT_OUTPUT_COLUMNS: &str = "_key, *";

/// Default column list for drilldown rows
pub const DEFAULT_DRILLDOWN_OUTPUT_COLUMNS: &str = "_key, _nsubrecs";

/// One drilldown block of a response
#[derive(Debug, Clone, Serialize)]
pub struct DrilldownResult {
    /// The group key this block drills down on
    pub key: String,
    /// Total distinct groups, before any pagination
    pub n_groups: u64,
    /// Offset that was applied when materializing `groups`
    pub offset: i64,
    /// Limit that was applied when materializing `groups`
    pub limit: i64,
    /// The windowed, projected group rows
    pub groups: Vec<Value>,
}

/// The assembled result of one query
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Query ID, for correlation with log events
    pub query_id: Uuid,
    /// Total matched records across all shards
    pub n_hits: u64,
    /// Matched records in shard enumeration order, projected
    pub records: Vec<Value>,
    /// One block per drilldown key, in key order
    pub drilldowns: Vec<DrilldownResult>,
}

/// Builds a `SearchResponse` from a completed context
pub struct ResponseBuilder<'a> {
    ctx: &'a ExecuteContext,
    output_columns: &'a str,
    drilldown_output_columns: &'a str,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(ctx: &'a ExecuteContext) -> Self {
        Self {
            ctx,
            output_columns: DEFAULT_OUTPUT_COLUMNS,
            drilldown_output_columns: DEFAULT_DRILLDOWN_OUTPUT_COLUMNS,
        }
    }

    /// Overrides the main record column list
    pub fn with_output_columns(mut self, columns: &'a str) -> Self {
        self.output_columns = columns;
        self
    }

    /// Overrides the drilldown column list
    pub fn with_drilldown_output_columns(mut self, columns: &'a str) -> Self {
        self.drilldown_output_columns = columns;
        self
    }

    pub fn build(&self) -> SearchResponse {
        let columns = parse_columns(self.output_columns);
        let mut n_hits: u64 = 0;
        let mut records = Vec::new();
        for result_set in self.ctx.result_sets() {
            n_hits += result_set.record_count() as u64;
            records.extend(
                result_set
                    .records()
                    .iter()
                    .map(|record| project(record, &columns)),
            );
        }

        SearchResponse {
            query_id: self.ctx.query_id(),
            n_hits,
            records,
            drilldowns: self.build_drilldowns(),
        }
    }

    fn build_drilldowns(&self) -> Vec<DrilldownResult> {
        let drilldown = self.ctx.drilldown();
        let columns = parse_columns(self.drilldown_output_columns);
        let offset = drilldown.output_offset();
        let limit = drilldown.limit();
        let sorted = !drilldown.unsorted_result_sets().is_empty();

        drilldown
            .keys()
            .iter()
            .zip(drilldown.result_sets())
            .enumerate()
            .map(|(i, (key, result_set))| {
                // When a sort paginated the output, the true group total
                // lives in the retained unsorted table
                let n_groups = if sorted {
                    drilldown.unsorted_result_sets()[i].record_count() as u64
                } else {
                    result_set.record_count() as u64
                };

                let windowed = apply_window(result_set.records().to_vec(), offset, limit);
                let groups = windowed
                    .iter()
                    .map(|record| project(record, &columns))
                    .collect();

                DrilldownResult {
                    key: key.clone(),
                    n_groups,
                    offset,
                    limit,
                    groups,
                }
            })
            .collect()
    }
}

/// Splits a column list, trimming whitespace and dropping empty segments
fn parse_columns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

/// Projects a record through a column list.
///
/// `*` expands to every record field not already projected; a named
/// column that the record lacks projects JSON null.
fn project(record: &Value, columns: &[String]) -> Value {
    let mut out = serde_json::Map::new();
    for column in columns {
        if column == "*" {
            if let Some(fields) = record.as_object() {
                for (name, value) in fields {
                    if !out.contains_key(name) {
                        out.insert(name.clone(), value.clone());
                    }
                }
            }
        } else if !out.contains_key(column) {
            out.insert(
                column.clone(),
                record.get(column).cloned().unwrap_or(Value::Null),
            );
        }
    }
    Value::Object(out)
}
