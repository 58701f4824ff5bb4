//! The sharded-search kernel
//!
//! Executes one query against a logical table in two phases, in strict
//! order:
//!
//! 1. Search: enumerate shards, classify each shard's key range against
//!    the target range, select matching records with the minimal filter,
//!    and accumulate result sets in enumeration order
//! 2. Drilldown: aggregate per-group counts across all accumulated result
//!    sets, one grouped output per drilldown key, independently
//!    sorted/paginated
//!
//! # Invariants
//!
//! - Result ordering follows shard enumeration order
//! - A shard fully inside the target with no filter is reused borrowed,
//!   never copied
//! - Every temporary result set is owned by the execution context and
//!   released exactly once, on every exit path

mod builder;
mod context;
mod enumerator;
mod errors;
mod executor;
mod shard;

pub use builder::RangeExpressionBuilder;
pub use context::{DrilldownContext, DrilldownRequest, ExecuteContext};
pub use enumerator::{Shard, ShardEnumerator, StaticEnumerator};
pub use errors::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use shard::ShardExecutor;
