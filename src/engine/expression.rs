//! Boolean selection expressions
//!
//! An expression is an AND-combined predicate list evaluated strictly:
//! no type coercion, missing fields never match, null never matches.
//! Range operations compare only within one JSON type.

use std::cmp::Ordering;

use serde_json::Value;

use super::errors::{EngineError, EngineResult};

/// Filter operation types
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: field = value
    Eq(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Less than: field < value
    Lt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
}

impl FilterOp {
    /// Returns the operation name for diagnostics
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Gt(_) => "gt",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lt(_) => "lt",
            FilterOp::Lte(_) => "lte",
        }
    }
}

/// A single predicate (field + operation)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq(value),
        }
    }

    /// Create a greater-than predicate
    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gt(value),
        }
    }

    /// Create a greater-than-or-equal predicate
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Gte(value),
        }
    }

    /// Create a less-than predicate
    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt(value),
        }
    }

    /// Create a less-than-or-equal predicate
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lte(value),
        }
    }

    /// Checks whether a record satisfies this predicate
    pub fn matches(&self, record: &Value) -> bool {
        let field_value = match record.get(&self.field) {
            Some(v) => v,
            None => return false, // Missing field = no match
        };

        // Null values never match
        if field_value.is_null() {
            return false;
        }

        match &self.op {
            FilterOp::Eq(expected) => field_value == expected,
            FilterOp::Gt(bound) => {
                matches!(range_cmp(field_value, bound), Some(Ordering::Greater))
            }
            FilterOp::Gte(bound) => matches!(
                range_cmp(field_value, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lt(bound) => matches!(range_cmp(field_value, bound), Some(Ordering::Less)),
            FilterOp::Lte(bound) => matches!(
                range_cmp(field_value, bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

/// Compares a record value against a range bound.
///
/// Only numbers against numbers and strings against strings are ordered;
/// everything else is incomparable and the predicate fails.
fn range_cmp(actual: &Value, bound: &Value) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => {
            let a_f = a.as_f64()?;
            let b_f = b.as_f64()?;
            a_f.partial_cmp(&b_f)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// An AND-combined predicate list
///
/// The empty expression matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionExpr {
    predicates: Vec<Predicate>,
}

impl SelectionExpr {
    /// The expression that matches every record
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Builds an expression from a predicate list
    pub fn from_predicates(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Adds a predicate, narrowing the expression
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Returns the predicate list
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns true if this expression matches every record
    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Checks whether a record satisfies every predicate
    pub fn matches(&self, record: &Value) -> bool {
        self.predicates.iter().all(|pred| pred.matches(record))
    }

    /// Validates the expression before a selection runs
    pub fn validate(&self) -> EngineResult<()> {
        for pred in &self.predicates {
            if pred.field.trim().is_empty() {
                return Err(EngineError::selection_failed(format!(
                    "blank field in {} predicate",
                    pred.op.op_name()
                )));
            }
        }
        Ok(())
    }
}
