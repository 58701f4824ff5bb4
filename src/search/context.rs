//! Per-query execution state
//!
//! The execution context owns every temporary result set a query creates:
//! the search-phase accumulation list and, per drilldown key, the grouped
//! output plus (when a sort paginated it) the retained unsorted grouped
//! table. Dropping the context releases all of them together, on every
//! exit path; borrowed result sets only drop their reference to the shard
//! table.

use uuid::Uuid;

use crate::engine::{ResultSet, SortKey};

/// Raw drilldown inputs, before parsing
///
/// All fields are optional; absent values fall back to defaults rather
/// than failing.
#[derive(Debug, Clone, Default)]
pub struct DrilldownRequest {
    /// Comma-separated group keys
    pub keys: Option<String>,
    /// Comma-separated sort keys (`-` prefix for descending)
    pub sort_keys: Option<String>,
    /// Pagination offset (default 0)
    pub offset: Option<i64>,
    /// Pagination limit (default 10)
    pub limit: Option<i64>,
}

impl DrilldownRequest {
    /// A request with no drilldown
    pub fn none() -> Self {
        Self::default()
    }
}

/// Parsed drilldown state plus the outputs it accumulates
#[derive(Debug)]
pub struct DrilldownContext {
    keys: Vec<String>,
    sort_keys: Vec<SortKey>,
    offset: i64,
    limit: i64,
    output_offset: i64,
    pub(crate) result_sets: Vec<ResultSet>,
    pub(crate) unsorted_result_sets: Vec<ResultSet>,
}

impl DrilldownContext {
    pub fn new(request: &DrilldownRequest) -> Self {
        let keys = parse_list(request.keys.as_deref());
        let sort_keys: Vec<SortKey> = parse_list(request.sort_keys.as_deref())
            .iter()
            .map(|raw| SortKey::parse(raw))
            .collect();
        let offset = request.offset.unwrap_or(0);
        let limit = request.limit.unwrap_or(10);

        // Sorting applies the window itself; the output layer then starts
        // at 0. Without a sort the output layer applies the offset.
        let output_offset = if sort_keys.is_empty() { offset } else { 0 };

        Self {
            keys,
            sort_keys,
            offset,
            limit,
            output_offset,
            result_sets: Vec::new(),
            unsorted_result_sets: Vec::new(),
        }
    }

    /// Group keys, one drilldown output per key
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Sort keys shared by every drilldown of this request
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// The offset the output layer still has to apply
    pub fn output_offset(&self) -> i64 {
        self.output_offset
    }

    /// Drilldown outputs, in key order
    pub fn result_sets(&self) -> &[ResultSet] {
        &self.result_sets
    }

    /// Pre-sort grouped tables, retained so the true total group count
    /// survives sort-time pagination; empty when no sort was requested
    pub fn unsorted_result_sets(&self) -> &[ResultSet] {
        &self.unsorted_result_sets
    }
}

/// Splits a comma-separated list, trimming surrounding whitespace.
///
/// Absent input yields an empty list; empty segments are dropped. Never
/// fails on malformed spacing.
fn parse_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect(),
    }
}

/// Per-query execution state
#[derive(Debug)]
pub struct ExecuteContext {
    query_id: Uuid,
    pub(crate) result_sets: Vec<ResultSet>,
    pub(crate) drilldown: DrilldownContext,
}

impl ExecuteContext {
    /// Creates the context for one query
    pub fn new(drilldown: DrilldownRequest) -> Self {
        Self {
            query_id: Uuid::new_v4(),
            result_sets: Vec::new(),
            drilldown: DrilldownContext::new(&drilldown),
        }
    }

    /// Query ID carried through log events
    pub fn query_id(&self) -> Uuid {
        self.query_id
    }

    /// Search-phase result sets, in shard enumeration order
    pub fn result_sets(&self) -> &[ResultSet] {
        &self.result_sets
    }

    /// Drilldown state and outputs
    pub fn drilldown(&self) -> &DrilldownContext {
        &self.drilldown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SortDirection;

    #[test]
    fn test_absent_input_yields_empty_lists_and_defaults() {
        let ctx = DrilldownContext::new(&DrilldownRequest::none());
        assert!(ctx.keys().is_empty());
        assert!(ctx.sort_keys().is_empty());
        assert_eq!(ctx.offset(), 0);
        assert_eq!(ctx.limit(), 10);
        assert_eq!(ctx.output_offset(), 0);
    }

    #[test]
    fn test_key_list_parsing_is_defensive() {
        let request = DrilldownRequest {
            keys: Some("  category ,host,  , status ".to_string()),
            ..DrilldownRequest::none()
        };
        let ctx = DrilldownContext::new(&request);
        assert_eq!(ctx.keys(), &["category", "host", "status"]);
    }

    #[test]
    fn test_empty_string_keys_yield_empty_list() {
        let request = DrilldownRequest {
            keys: Some("   ".to_string()),
            ..DrilldownRequest::none()
        };
        let ctx = DrilldownContext::new(&request);
        assert!(ctx.keys().is_empty());
    }

    #[test]
    fn test_sort_key_parsing() {
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            sort_keys: Some("-_nsubrecs, _key".to_string()),
            ..DrilldownRequest::none()
        };
        let ctx = DrilldownContext::new(&request);

        assert_eq!(ctx.sort_keys().len(), 2);
        assert_eq!(ctx.sort_keys()[0].field, "_nsubrecs");
        assert_eq!(ctx.sort_keys()[0].direction, SortDirection::Desc);
        assert_eq!(ctx.sort_keys()[1].field, "_key");
        assert_eq!(ctx.sort_keys()[1].direction, SortDirection::Asc);
    }

    #[test]
    fn test_output_offset_without_sort_is_the_offset() {
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            offset: Some(3),
            ..DrilldownRequest::none()
        };
        let ctx = DrilldownContext::new(&request);
        assert_eq!(ctx.output_offset(), 3);
    }

    #[test]
    fn test_output_offset_with_sort_is_zero() {
        let request = DrilldownRequest {
            keys: Some("category".to_string()),
            sort_keys: Some("-_nsubrecs".to_string()),
            offset: Some(3),
            ..DrilldownRequest::none()
        };
        let ctx = DrilldownContext::new(&request);
        assert_eq!(ctx.output_offset(), 0);
        assert_eq!(ctx.offset(), 3);
    }

    #[test]
    fn test_context_starts_empty() {
        let ctx = ExecuteContext::new(DrilldownRequest::none());
        assert!(ctx.result_sets().is_empty());
        assert!(ctx.drilldown().result_sets().is_empty());
    }
}
