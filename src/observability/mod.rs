//! Observability subsystem for stratadb
//!
//! Structured JSON logging around query execution.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on execution
//! 2. Synchronous, no buffering, no background threads
//! 3. Deterministic output: one line per event, sorted field keys
//!
//! # Usage
//!
//! ```ignore
//! use stratadb::observability::{Logger, ObservationScope};
//!
//! Logger::info("SEARCH_COMPLETE", &[("n_result_sets", "3")]);
//!
//! let scope = ObservationScope::new("DRILLDOWN");
//! // ... do work ...
//! scope.complete(); // logs DRILLDOWN_COMPLETE; early drop logs DRILLDOWN_ERROR
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
