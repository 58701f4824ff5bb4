//! Storage and expression primitives for stratadb
//!
//! The engine owns the in-memory table model and the operations the search
//! kernel drives: strict predicate selection, count-only grouping, and
//! multi-key sorting with pagination windows.
//!
//! # Principles
//!
//! - Records are JSON objects; matching is strict, no type coercion
//! - Shard tables are immutable and read-shared for a query's duration
//! - Every operation is deterministic: same input, same output

mod errors;
mod expression;
mod group;
mod result;
mod sort;
mod table;
mod value;

pub use errors::{EngineError, EngineResult};
pub use expression::{FilterOp, Predicate, SelectionExpr};
pub use group::GroupAccumulator;
pub use result::ResultSet;
pub use sort::{apply_window, sort_window, SortDirection, SortKey};
pub use table::ShardTable;
pub use value::{compare_fields, compare_values};
