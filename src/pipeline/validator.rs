//! Validator facade: the programmatic surface a host object talks to.
//!
//! A `Validator` pairs a shared, read-only rule registry with a private
//! error collector, scoped to one validating entity. The host looks up its
//! own field metadata, then calls [`Validator::validate`] with the field
//! name, its raw directive strings and the candidate value.

use crate::core::collector::{ErrorCollection, ErrorCollector};
use crate::core::error::{CollectorError, RegistryError, VigilResult};
use crate::core::types::{FieldRef, Value};
use crate::directive::descriptor::Descriptor;
use crate::directive::parser::parse;
use crate::pipeline::executor::Executor;
use crate::rules::registry::RuleRegistry;
use indexmap::IndexMap;
use std::sync::Arc;

/// Runs the full parse-and-pipeline flow for one validating entity.
pub struct Validator {
    registry: Arc<RuleRegistry>,
    collector: ErrorCollector,
    class: String,
}

impl Validator {
    /// Create a validator for the named owning type, with its own registry
    /// populated with the built-in rule set. Eager setup here enforces the
    /// registry-before-first-run invariant.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(RuleRegistry::with_builtins()),
            collector: ErrorCollector::new(),
            class: class.into(),
        }
    }

    /// Create a validator over an existing shared registry. Many validators
    /// can share one registry; each keeps its own collector.
    pub fn with_registry(class: impl Into<String>, registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            collector: ErrorCollector::new(),
            class: class.into(),
        }
    }

    /// Register a custom rule, e.g. a bespoke `after.string:password` hook.
    ///
    /// Only possible while this validator holds the sole reference to its
    /// registry; once the registry is shared it is frozen.
    pub fn register_rule<F>(&mut self, pattern: &str, rule: F) -> Result<(), RegistryError>
    where
        F: Fn(&Descriptor, Value, &mut ErrorCollector) -> Value + Send + Sync + 'static,
    {
        let registry = Arc::get_mut(&mut self.registry).ok_or(RegistryError::Frozen)?;
        registry.register(pattern, rule)
    }

    /// The shared registry handle, for spawning sibling validators.
    pub fn registry(&self) -> Arc<RuleRegistry> {
        Arc::clone(&self.registry)
    }

    /// Validate one field's value against its directive list.
    ///
    /// Returns the (possibly transformed) value whether or not failures
    /// were recorded; check [`is_valid`](Self::is_valid) afterwards.
    /// Configuration errors — a malformed directive, a declared type with
    /// no registered rules — abort and propagate instead of being recorded.
    pub fn validate<S>(&mut self, field: &str, directives: &[S], value: Value) -> VigilResult<Value>
    where
        S: AsRef<str>,
    {
        let field_ref = FieldRef::new(self.class.clone(), field);

        let descriptors = directives
            .iter()
            .map(|d| parse(d.as_ref(), field_ref.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let executor = Executor::new(&self.registry);
        let value = executor.execute(&descriptors, value, &mut self.collector)?;
        Ok(value)
    }

    /// Cursor view over one field's recorded failures.
    pub fn errors(&self, field: &str) -> Result<ErrorCollection, CollectorError> {
        self.collector.get(field)
    }

    /// Views over every field with recorded failures.
    pub fn all_errors(&self) -> IndexMap<String, ErrorCollection> {
        self.collector.all()
    }

    /// True when no field has recorded a failure.
    pub fn is_valid(&self) -> bool {
        self.collector.is_valid()
    }

    /// Direct access to the collector, for custom rules under test.
    pub fn collector(&self) -> &ErrorCollector {
        &self.collector
    }
}
