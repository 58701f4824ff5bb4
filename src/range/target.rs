//! Target ranges and shard key ranges

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Whether a range border includes its boundary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    #[default]
    Include,
    Exclude,
}

impl Border {
    pub fn as_str(&self) -> &'static str {
        match self {
            Border::Include => "include",
            Border::Exclude => "exclude",
        }
    }
}

/// The key range a query targets
///
/// Immutable and query-scoped. A missing bound is unbounded on that side;
/// each present bound carries its own border flag.
#[derive(Debug, Clone, Default)]
pub struct TargetRange {
    min: Option<Value>,
    min_border: Border,
    max: Option<Value>,
    max_border: Border,
}

impl TargetRange {
    /// The range accepting every key
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Sets the lower bound
    pub fn with_min(mut self, key: Value, border: Border) -> Self {
        self.min = Some(key);
        self.min_border = border;
        self
    }

    /// Sets the upper bound
    pub fn with_max(mut self, key: Value, border: Border) -> Self {
        self.max = Some(key);
        self.max_border = border;
        self
    }

    pub fn min(&self) -> Option<&Value> {
        self.min.as_ref()
    }

    pub fn min_border(&self) -> Border {
        self.min_border
    }

    pub fn max(&self) -> Option<&Value> {
        self.max.as_ref()
    }

    pub fn max_border(&self) -> Border {
        self.max_border
    }
}

/// The half-open `[min, max)` key span of one shard
///
/// The natural shape of a time partition: a daily shard spans midnight to
/// the next midnight, the end key excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRange {
    min: Value,
    max: Value,
}

impl KeyRange {
    pub fn new(min: Value, max: Value) -> Self {
        Self { min, max }
    }

    /// Inclusive lower bound
    pub fn min(&self) -> &Value {
        &self.min
    }

    /// Exclusive upper bound
    pub fn max(&self) -> &Value {
        &self.max
    }

    /// The span of one calendar day.
    ///
    /// Returns `None` past the supported calendar range.
    pub fn calendar_day(day: NaiveDate) -> Option<Self> {
        let next = day.succ_opt()?;
        Some(Self::new(
            timestamp_value(day.and_time(NaiveTime::MIN)),
            timestamp_value(next.and_time(NaiveTime::MIN)),
        ))
    }

    /// The span of one calendar month.
    ///
    /// Returns `None` for an invalid year/month.
    pub fn calendar_month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self::new(
            timestamp_value(first.and_time(NaiveTime::MIN)),
            timestamp_value(next.and_time(NaiveTime::MIN)),
        ))
    }
}

/// Formats a timestamp as a shard key value.
///
/// The `YYYY-MM-DD hh:mm:ss` form orders lexicographically, so string
/// comparison of keys matches time order.
pub fn timestamp_value(timestamp: NaiveDateTime) -> Value {
    Value::String(timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unbounded_target() {
        let target = TargetRange::unbounded();
        assert!(target.min().is_none());
        assert!(target.max().is_none());
    }

    #[test]
    fn test_target_builders() {
        let target = TargetRange::unbounded()
            .with_min(json!("2024-01-02 00:00:00"), Border::Include)
            .with_max(json!("2024-01-04 00:00:00"), Border::Exclude);

        assert_eq!(target.min(), Some(&json!("2024-01-02 00:00:00")));
        assert_eq!(target.min_border(), Border::Include);
        assert_eq!(target.max_border(), Border::Exclude);
    }

    #[test]
    fn test_calendar_day_span() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let range = KeyRange::calendar_day(day).unwrap();

        assert_eq!(range.min(), &json!("2024-01-01 00:00:00"));
        assert_eq!(range.max(), &json!("2024-01-02 00:00:00"));
    }

    #[test]
    fn test_calendar_day_crosses_month() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let range = KeyRange::calendar_day(day).unwrap();
        assert_eq!(range.max(), &json!("2024-02-01 00:00:00"));
    }

    #[test]
    fn test_calendar_month_span() {
        let range = KeyRange::calendar_month(2024, 12).unwrap();
        assert_eq!(range.min(), &json!("2024-12-01 00:00:00"));
        assert_eq!(range.max(), &json!("2025-01-01 00:00:00"));
    }

    #[test]
    fn test_calendar_month_invalid() {
        assert!(KeyRange::calendar_month(2024, 13).is_none());
    }
}
