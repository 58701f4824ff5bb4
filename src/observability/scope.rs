//! Scope-based phase logging
//!
//! A scope logs `{name}_BEGIN` when created and `{name}_COMPLETE` when
//! completed. If it is dropped without completing (an early return or
//! error path), it logs `{name}_ERROR` instead, so every phase leaves a
//! terminal event.

use std::cell::Cell;

use super::logger::Logger;

/// A scope that automatically logs start and terminal events
pub struct ObservationScope {
    name: String,
    completed: Cell<bool>,
    fields: Vec<(String, String)>,
}

impl ObservationScope {
    /// Create a new observation scope, logging `{name}_BEGIN`
    pub fn new(name: &str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope with fields carried through to the
    /// terminal event
    pub fn with_fields(name: &str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{name}_BEGIN"), fields);

        Self {
            name: name.to_string(),
            completed: Cell::new(false),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Mark the scope as successfully completed, logging `{name}_COMPLETE`
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Complete with additional fields on the terminal event
    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);

        let mut all_fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        all_fields.extend(extra_fields.iter().copied());

        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    /// Mark the scope as failed, logging `{name}_FAILED` with the reason
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        Logger::error(&format!("{}_FAILED", self.name), &[("reason", reason)]);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.completed.get() {
            let fields: Vec<(&str, &str)> = self
                .fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            Logger::error(&format!("{}_ERROR", self.name), &fields);
        }
    }
}
