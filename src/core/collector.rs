//! Append-only, field-keyed storage for validation failures.
//!
//! The collector is owned by one validating entity and is never shared
//! across runs. Failures accumulate in hook-execution order; nothing is ever
//! removed, and `is_valid` is defined purely as "no field has any failure".

use crate::core::error::CollectorError;
use crate::core::types::Value;
use crate::directive::descriptor::Descriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single recorded validation failure.
///
/// Failures are data, not `Err` values: execution continues through the
/// remaining hooks and directives after one is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationFailure {
    /// Label of the owning type, for attribution.
    pub class: String,
    /// Name of the field the failure belongs to.
    pub field: String,
    /// The rejected value, as it was when the hook ran.
    pub value: Value,
    /// Human-readable failure message.
    pub message: String,
}

/// Field-keyed store of validation failures.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    /// Failure buckets keyed by field name, in first-failure order.
    buckets: IndexMap<String, Vec<ValidationFailure>>,
}

impl ErrorCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }

    /// Append a failure under the descriptor's field bucket.
    ///
    /// Insertion order within a bucket is the execution order of the hooks
    /// that produced the failures.
    pub fn add(&mut self, message: impl Into<String>, value: &Value, descriptor: &Descriptor) {
        let field = descriptor.field();
        let failure = ValidationFailure {
            class: field.class.clone(),
            field: field.name.clone(),
            value: value.clone(),
            message: message.into(),
        };

        log::debug!("validation failure on {}: {}", field, failure.message);

        self.buckets
            .entry(field.name.clone())
            .or_default()
            .push(failure);
    }

    /// Get a cursor view over one field's failures.
    ///
    /// Fails when the field has no recorded failures at all.
    pub fn get(&self, field: &str) -> Result<ErrorCollection, CollectorError> {
        self.buckets
            .get(field)
            .map(|bucket| ErrorCollection::new(bucket.clone()))
            .ok_or_else(|| CollectorError::NoSuchField(field.to_string()))
    }

    /// Get views over every field that has failures, in first-failure order.
    pub fn all(&self) -> IndexMap<String, ErrorCollection> {
        self.buckets
            .iter()
            .map(|(field, bucket)| (field.clone(), ErrorCollection::new(bucket.clone())))
            .collect()
    }

    /// Check whether any field recorded a failure.
    pub fn is_valid(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of failures across all fields.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Check if the collector holds no failures.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Read cursor over one field's failure list.
///
/// `first`/`next`/`prev`/`last` move the cursor and project the current
/// entry's fields onto the view. Until `first` is called the projected
/// fields hold their defaults; an out-of-range move is a no-op that keeps
/// the previous position and projection.
#[derive(Debug, Clone)]
pub struct ErrorCollection {
    entries: Vec<ValidationFailure>,
    index: usize,
    /// Projected owning-type label of the current entry.
    pub class: String,
    /// Projected field name of the current entry.
    pub field: String,
    /// Projected rejected value of the current entry.
    pub value: Value,
    /// Projected message of the current entry.
    pub message: String,
}

impl ErrorCollection {
    /// Create a view over a failure list. The cursor starts unprojected;
    /// call [`first`](Self::first) before reading the projected fields.
    pub fn new(entries: Vec<ValidationFailure>) -> Self {
        Self {
            entries,
            index: 0,
            class: String::new(),
            field: String::new(),
            value: Value::None,
            message: String::new(),
        }
    }

    fn project(&mut self) {
        if let Some(entry) = self.entries.get(self.index) {
            self.class = entry.class.clone();
            self.field = entry.field.clone();
            self.value = entry.value.clone();
            self.message = entry.message.clone();
        }
    }

    /// Move the cursor to the first entry.
    pub fn first(&mut self) -> &mut Self {
        self.index = 0;
        self.project();
        self
    }

    /// Move the cursor forward by one, if the next entry exists.
    pub fn next(&mut self) -> &mut Self {
        if self.entries.get(self.index + 1).is_some() {
            self.index += 1;
            self.project();
        }
        self
    }

    /// Move the cursor back by one, if a previous entry exists.
    pub fn prev(&mut self) -> &mut Self {
        if self.index > 0 && self.entries.get(self.index - 1).is_some() {
            self.index -= 1;
            self.project();
        }
        self
    }

    /// Jump the cursor to the last entry.
    pub fn last(&mut self) -> &mut Self {
        if !self.entries.is_empty() {
            self.index = self.entries.len() - 1;
            self.project();
        }
        self
    }

    /// Number of failures in the bucket.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Project the full bucket to its messages, ignoring the cursor.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    /// The underlying failure entries, in insertion order.
    pub fn entries(&self) -> &[ValidationFailure] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldRef;
    use crate::directive::descriptor::{Descriptor, MatchDescriptor};

    fn descriptor_for(field: &str) -> Descriptor {
        Descriptor::Match(MatchDescriptor {
            pattern: "^x".to_string(),
            field: FieldRef::new("Stub", field),
        })
    }

    fn collector_with(field: &str, messages: &[&str]) -> ErrorCollector {
        let mut collector = ErrorCollector::new();
        let descriptor = descriptor_for(field);
        for message in messages {
            collector.add(*message, &Value::Integer(1), &descriptor);
        }
        collector
    }

    #[test]
    fn test_empty_collector_is_valid() {
        let collector = ErrorCollector::new();
        assert!(collector.is_valid());
        assert!(collector.all().is_empty());
        assert!(matches!(
            collector.get("missing"),
            Err(CollectorError::NoSuchField(_))
        ));
    }

    #[test]
    fn test_add_groups_by_field() {
        let mut collector = ErrorCollector::new();
        collector.add("first", &Value::Integer(1), &descriptor_for("a"));
        collector.add("second", &Value::Integer(2), &descriptor_for("b"));
        collector.add("third", &Value::Integer(3), &descriptor_for("a"));

        assert!(!collector.is_valid());
        assert_eq!(collector.len(), 3);
        assert_eq!(collector.get("a").unwrap().count(), 2);
        assert_eq!(collector.get("b").unwrap().count(), 1);

        // Field order follows first failure, not last
        let fields: Vec<_> = collector.all().keys().cloned().collect();
        assert_eq!(fields, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_cursor_walks_in_insertion_order() {
        let collector = collector_with("pw", &["one", "two", "three"]);
        let mut view = collector.get("pw").unwrap();

        assert_eq!(view.first().message, "one");
        assert_eq!(view.next().message, "two");
        assert_eq!(view.next().message, "three");
        assert_eq!(view.prev().message, "two");
        assert_eq!(view.last().message, "three");
    }

    #[test]
    fn test_cursor_out_of_range_is_noop() {
        let collector = collector_with("pw", &["only"]);
        let mut view = collector.get("pw").unwrap();

        view.first();
        view.next(); // no second entry: cursor stays put
        assert_eq!(view.message, "only");
        view.prev(); // no entry before the first either
        assert_eq!(view.message, "only");
    }

    #[test]
    fn test_projection_stale_before_first() {
        let collector = collector_with("pw", &["only"]);
        let view = collector.get("pw").unwrap();
        assert!(view.message.is_empty());
        assert!(view.value.is_none());
    }

    #[test]
    fn test_messages_ignore_cursor() {
        let collector = collector_with("pw", &["one", "two"]);
        let view = collector.get("pw").unwrap();
        assert_eq!(view.messages(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_failure_attribution() {
        let collector = collector_with("pw", &["only"]);
        let mut view = collector.get("pw").unwrap();
        view.first();
        assert_eq!(view.class, "Stub");
        assert_eq!(view.field, "pw");
        assert_eq!(view.value, Value::Integer(1));
    }
}
