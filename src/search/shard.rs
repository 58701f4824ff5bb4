//! Per-shard execution
//!
//! Classifies one shard against the target range, then produces at most
//! one result set for it with the minimal filtering that relation allows:
//! a disjoint shard is skipped, a fully covered shard with no filter is
//! reused borrowed, everything else selects through a boundary-restricted
//! expression. Expressions are locals, dropped before execution returns
//! on every path.

use std::sync::Arc;

use crate::engine::{EngineResult, ResultSet, SelectionExpr};
use crate::range::{CoverType, TargetRange};

use super::builder::RangeExpressionBuilder;
use super::context::ExecuteContext;
use super::enumerator::Shard;

/// Executes the search phase for one shard
pub struct ShardExecutor<'a> {
    shard: &'a Shard,
    target: &'a TargetRange,
    filter: Option<&'a SelectionExpr>,
    cover_type: CoverType,
}

impl<'a> ShardExecutor<'a> {
    pub fn new(shard: &'a Shard, target: &'a TargetRange, filter: Option<&'a SelectionExpr>) -> Self {
        let cover_type = target.cover_type(&shard.range);
        Self {
            shard,
            target,
            filter,
            cover_type,
        }
    }

    /// The cover relation computed for this shard
    pub fn cover_type(&self) -> CoverType {
        self.cover_type
    }

    /// Appends this shard's matches, if any, to the context
    pub fn execute(&self, ctx: &mut ExecuteContext) -> EngineResult<()> {
        let builder = RangeExpressionBuilder::new(&self.shard.key_field, self.target, self.filter);

        match self.cover_type {
            CoverType::None => Ok(()),
            CoverType::All => self.filter_shard_all(&builder, ctx),
            CoverType::PartialMin => self.filter_table(builder.build_partial_min(), ctx),
            CoverType::PartialMax => self.filter_table(builder.build_partial_max(), ctx),
            CoverType::PartialMinAndMax => {
                self.filter_table(builder.build_partial_min_and_max(), ctx)
            }
        }
    }

    fn filter_shard_all(
        &self,
        builder: &RangeExpressionBuilder<'_>,
        ctx: &mut ExecuteContext,
    ) -> EngineResult<()> {
        if self.filter.is_none() {
            // Every record qualifies: reuse the shard's table as-is
            ctx.result_sets
                .push(ResultSet::Borrowed(Arc::clone(&self.shard.table)));
            Ok(())
        } else {
            self.filter_table(builder.build_all(), ctx)
        }
    }

    fn filter_table(&self, expr: SelectionExpr, ctx: &mut ExecuteContext) -> EngineResult<()> {
        let records = self.shard.table.select(&expr)?;
        ctx.result_sets.push(ResultSet::Owned(records));
        Ok(())
    }
}
