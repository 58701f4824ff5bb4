//! Shard key ranges and target-range classification
//!
//! A query carries a `TargetRange` (optional min/max, each with an
//! inclusive or exclusive border); every shard carries a half-open
//! `KeyRange`. The classifier relates the two as a `CoverType`, which
//! tells the shard executor the minimal filtering the shard needs.

mod cover;
mod target;

pub use cover::CoverType;
pub use target::{timestamp_value, Border, KeyRange, TargetRange};
