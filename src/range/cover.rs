//! Range cover classification
//!
//! The classifier is pure and total: it compares a shard's half-open key
//! span against the target range and nothing else. The shard executor
//! matches exhaustively on the result, so every relation is handled at
//! compile time.

use std::cmp::Ordering;

use crate::engine::compare_values;

use super::target::{Border, KeyRange, TargetRange};

/// How a shard's key range relates to a query's target range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverType {
    /// The ranges do not intersect; the shard can be skipped outright
    None,
    /// The shard lies entirely inside the target; no boundary condition
    /// is needed beyond the caller's filter
    All,
    /// The shard extends below the target's min; a lower bound must be
    /// added to the filter
    PartialMin,
    /// The shard extends above the target's max; an upper bound must be
    /// added to the filter
    PartialMax,
    /// The shard extends beyond the target on both sides
    PartialMinAndMax,
}

impl TargetRange {
    /// Classifies a shard's key range against this target range.
    pub fn cover_type(&self, shard: &KeyRange) -> CoverType {
        if self.is_disjoint(shard) {
            return CoverType::None;
        }

        // Lower side fully covered: the smallest shard key satisfies the
        // target's lower bound.
        let lower_covered = match self.min() {
            None => true,
            Some(min) => match compare_values(shard.min(), min) {
                Ordering::Greater => true,
                Ordering::Equal => self.min_border() == Border::Include,
                Ordering::Less => false,
            },
        };

        // Upper side fully covered: the shard's exclusive end does not
        // pass the target's max. At equality the border flag is moot
        // since no shard key reaches the end itself.
        let upper_covered = match self.max() {
            None => true,
            Some(max) => compare_values(shard.max(), max) != Ordering::Greater,
        };

        match (lower_covered, upper_covered) {
            (true, true) => CoverType::All,
            (false, true) => CoverType::PartialMin,
            (true, false) => CoverType::PartialMax,
            (false, false) => CoverType::PartialMinAndMax,
        }
    }

    fn is_disjoint(&self, shard: &KeyRange) -> bool {
        if let Some(min) = self.min() {
            // The shard end is exclusive, so a shard ending at the target
            // min holds no qualifying key regardless of the min border.
            if compare_values(shard.max(), min) != Ordering::Greater {
                return true;
            }
        }
        if let Some(max) = self.max() {
            match compare_values(shard.min(), max) {
                Ordering::Greater => return true,
                Ordering::Equal => return self.max_border() == Border::Exclude,
                Ordering::Less => {}
            }
        }
        false
    }
}
