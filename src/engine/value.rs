//! Total ordering over JSON values
//!
//! Shared by the range classifier, predicate evaluation, and sorting.
//!
//! Ordering rules:
//! - null < bool < number < string < array < object
//! - For same types, natural ordering; numbers compare as f64

use std::cmp::Ordering;

use serde_json::Value;

/// Rank of a value's JSON type under the engine ordering
fn type_order(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Compares two JSON values under the engine's total ordering.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let a_type = type_order(a);
    let b_type = type_order(b);

    if a_type != b_type {
        return a_type.cmp(&b_type);
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
        (Value::Number(a_n), Value::Number(b_n)) => {
            let a_f = a_n.as_f64().unwrap_or(0.0);
            let b_f = b_n.as_f64().unwrap_or(0.0);
            a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
        }
        (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
        // Arrays and objects are not ordered among themselves
        _ => Ordering::Equal,
    }
}

/// Compares two optional field values; an absent field sorts first.
pub fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => compare_values(a_val, b_val),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cross_type_ordering() {
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!(true), &json!(0)), Ordering::Less);
        assert_eq!(compare_values(&json!(99), &json!("a")), Ordering::Less);
    }

    #[test]
    fn test_number_ordering() {
        assert_eq!(compare_values(&json!(1), &json!(2)), Ordering::Less);
        assert_eq!(compare_values(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(compare_values(&json!(3), &json!(3.0)), Ordering::Equal);
    }

    #[test]
    fn test_string_ordering_is_lexicographic() {
        assert_eq!(
            compare_values(&json!("2024-01-01 00:00:00"), &json!("2024-01-02 00:00:00")),
            Ordering::Less
        );
        assert_eq!(compare_values(&json!("b"), &json!("b")), Ordering::Equal);
    }

    #[test]
    fn test_absent_field_sorts_first() {
        let present = json!("x");
        assert_eq!(compare_fields(None, Some(&present)), Ordering::Less);
        assert_eq!(compare_fields(Some(&present), None), Ordering::Greater);
        assert_eq!(compare_fields(None, None), Ordering::Equal);
    }
}
