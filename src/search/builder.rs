//! Range expression construction
//!
//! Builds the selection expression for one shard: the caller's filter, if
//! any, AND-combined with only the boundary conditions the shard's cover
//! relation requires. A shard already known to lie inside a bound never
//! re-checks that bound per record.

use crate::engine::{Predicate, SelectionExpr};
use crate::range::{Border, TargetRange};

/// Builds boundary-restricted expressions for one shard
pub struct RangeExpressionBuilder<'a> {
    key_field: &'a str,
    target: &'a TargetRange,
    filter: Option<&'a SelectionExpr>,
}

impl<'a> RangeExpressionBuilder<'a> {
    pub fn new(
        key_field: &'a str,
        target: &'a TargetRange,
        filter: Option<&'a SelectionExpr>,
    ) -> Self {
        Self {
            key_field,
            target,
            filter,
        }
    }

    /// The caller's filter with no boundary condition
    pub fn build_all(&self) -> SelectionExpr {
        self.base()
    }

    /// Filter plus the target's lower boundary condition
    pub fn build_partial_min(&self) -> SelectionExpr {
        match self.min_predicate() {
            Some(pred) => self.base().and(pred),
            None => self.base(),
        }
    }

    /// Filter plus the target's upper boundary condition
    pub fn build_partial_max(&self) -> SelectionExpr {
        match self.max_predicate() {
            Some(pred) => self.base().and(pred),
            None => self.base(),
        }
    }

    /// Filter plus both boundary conditions
    pub fn build_partial_min_and_max(&self) -> SelectionExpr {
        let mut expr = self.base();
        if let Some(pred) = self.min_predicate() {
            expr = expr.and(pred);
        }
        if let Some(pred) = self.max_predicate() {
            expr = expr.and(pred);
        }
        expr
    }

    fn base(&self) -> SelectionExpr {
        self.filter.cloned().unwrap_or_else(SelectionExpr::match_all)
    }

    fn min_predicate(&self) -> Option<Predicate> {
        self.target.min().map(|min| match self.target.min_border() {
            Border::Include => Predicate::gte(self.key_field, min.clone()),
            Border::Exclude => Predicate::gt(self.key_field, min.clone()),
        })
    }

    fn max_predicate(&self) -> Option<Predicate> {
        self.target.max().map(|max| match self.target.max_border() {
            Border::Include => Predicate::lte(self.key_field, max.clone()),
            Border::Exclude => Predicate::lt(self.key_field, max.clone()),
        })
    }
}
