//! Pipeline executor: runs descriptor hook chains over a value.
//!
//! Execution is a strict sequential fold. For each descriptor the before,
//! main and after phases run in that order; the value out of one descriptor
//! feeds the next. Failures accumulate in the collector and never stop the
//! run — only a missing registry entry aborts, because that is broken setup
//! rather than a bad value.

use crate::core::collector::ErrorCollector;
use crate::core::error::{RegistryError, RegistryResult};
use crate::core::types::Value;
use crate::directive::descriptor::Descriptor;
use crate::rules::registry::{RuleFn, RuleRegistry};
use indexmap::IndexMap;

/// Executes descriptor lists against a read-only rule registry.
pub struct Executor<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> Executor<'a> {
    /// Create an executor over a populated registry.
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Run every descriptor in order and return the final value.
    ///
    /// The final value comes back whether or not failures were recorded:
    /// validity and value-acceptance are decoupled, and the caller decides
    /// what an invalid value means via the collector.
    pub fn execute(
        &self,
        descriptors: &[Descriptor],
        value: Value,
        collector: &mut ErrorCollector,
    ) -> RegistryResult<Value> {
        let mut value = value;
        for descriptor in descriptors {
            value = self.execute_one(descriptor, value, collector)?;
        }
        Ok(value)
    }

    fn execute_one(
        &self,
        descriptor: &Descriptor,
        value: Value,
        collector: &mut ErrorCollector,
    ) -> RegistryResult<Value> {
        let type_key = descriptor.type_key();
        let entry = self
            .registry
            .resolve(type_key)
            .ok_or_else(|| RegistryError::RuleNotFound(type_key.to_string()))?;
        if entry.main.is_empty() {
            return Err(RegistryError::EmptyMainChain(type_key.to_string()));
        }

        let mut value = run_hooks(&entry.before, descriptor, value, collector, "before");

        log::trace!("running {} main rule(s) for '{}'", entry.main.len(), type_key);
        for rule in &entry.main {
            value = rule(descriptor, value, collector);
        }

        Ok(run_hooks(&entry.after, descriptor, value, collector, "after"))
    }
}

/// Run the named hooks a descriptor's modifiers select, in insertion order.
/// Modifier names with no registered hook are silently skipped.
fn run_hooks(
    hooks: &IndexMap<String, RuleFn>,
    descriptor: &Descriptor,
    value: Value,
    collector: &mut ErrorCollector,
    phase: &str,
) -> Value {
    let mut value = value;
    for (name, rule) in hooks {
        if descriptor.modifiers().iter().any(|m| m == name) {
            log::trace!("running {} hook '{}' for '{}'", phase, name, descriptor.type_key());
            value = rule(descriptor, value, collector);
        }
    }
    value
}

/// Convenience free function mirroring [`Executor::execute`].
pub fn execute(
    registry: &RuleRegistry,
    descriptors: &[Descriptor],
    value: Value,
    collector: &mut ErrorCollector,
) -> RegistryResult<Value> {
    Executor::new(registry).execute(descriptors, value, collector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldRef;
    use crate::directive::descriptor::{DeclaredType, TypeDescriptor};
    use crate::directive::parse;

    fn field() -> FieldRef {
        FieldRef::new("Stub", "subject")
    }

    fn descriptors(directives: &[&str]) -> Vec<Descriptor> {
        directives
            .iter()
            .map(|d| parse(d, field()).unwrap())
            .collect()
    }

    #[test]
    fn test_missing_type_fails_fast() {
        let registry = RuleRegistry::new();
        let mut collector = ErrorCollector::new();
        let result = execute(
            &registry,
            &descriptors(&["type(string)"]),
            Value::Integer(1),
            &mut collector,
        );

        assert!(matches!(result, Err(RegistryError::RuleNotFound(_))));
        // Setup failures are never recorded as field failures
        assert!(collector.is_valid());
    }

    #[test]
    fn test_empty_main_chain_fails_fast() {
        let mut registry = RuleRegistry::new();
        registry
            .register("before.string:cast", |_, v, _| v)
            .unwrap();

        let mut collector = ErrorCollector::new();
        let result = execute(
            &registry,
            &descriptors(&["type(string)"]),
            Value::Integer(1),
            &mut collector,
        );
        assert!(matches!(result, Err(RegistryError::EmptyMainChain(_))));
    }

    #[test]
    fn test_value_threads_through_phases() {
        let mut registry = RuleRegistry::new();
        registry
            .register("before.int:double", |_, v, _| {
                Value::Integer(v.as_integer().unwrap() * 2)
            })
            .unwrap();
        registry
            .register("int", |_, v, _| Value::Integer(v.as_integer().unwrap() + 1))
            .unwrap();
        registry
            .register("after.int:double", |_, v, _| {
                Value::Integer(v.as_integer().unwrap() * 2)
            })
            .unwrap();

        let mut collector = ErrorCollector::new();
        let out = execute(
            &registry,
            &descriptors(&["type(int:double)"]),
            Value::Integer(5),
            &mut collector,
        )
        .unwrap();

        // before doubles to 10, main adds 1, after doubles to 22
        assert_eq!(out, Value::Integer(22));
    }

    #[test]
    fn test_hooks_require_matching_modifier() {
        let mut registry = RuleRegistry::new();
        registry
            .register("before.int:double", |_, v, _| {
                Value::Integer(v.as_integer().unwrap() * 2)
            })
            .unwrap();
        registry.register("int", |_, v, _| v).unwrap();

        let mut collector = ErrorCollector::new();
        let out = execute(
            &registry,
            &descriptors(&["type(int)"]),
            Value::Integer(5),
            &mut collector,
        )
        .unwrap();

        // No modifier declared, so the hook never ran
        assert_eq!(out, Value::Integer(5));
    }

    #[test]
    fn test_unknown_modifier_silently_skipped() {
        let registry = RuleRegistry::with_builtins();
        let mut collector = ErrorCollector::new();
        let out = execute(
            &registry,
            &descriptors(&["type(string:no_such_hook)"]),
            Value::String("ok".to_string()),
            &mut collector,
        )
        .unwrap();

        assert_eq!(out, Value::String("ok".to_string()));
        assert!(collector.is_valid());
    }

    #[test]
    fn test_descriptors_chain_sequentially() {
        let registry = RuleRegistry::with_builtins();
        let mut collector = ErrorCollector::new();

        // First directive casts the numeric string, second checks the result
        let out = execute(
            &registry,
            &descriptors(&["type(int:cast)", "type(numeric)"]),
            Value::String("42".to_string()),
            &mut collector,
        )
        .unwrap();

        assert_eq!(out, Value::Integer(42));
        assert!(collector.is_valid());
    }

    #[test]
    fn test_failures_do_not_stop_later_directives() {
        let registry = RuleRegistry::with_builtins();
        let mut collector = ErrorCollector::new();

        let out = execute(
            &registry,
            &descriptors(&["type(string)", "type(numeric)"]),
            Value::Boolean(true),
            &mut collector,
        )
        .unwrap();

        // Both mains flagged the boolean, and the value still came back
        assert_eq!(out, Value::Boolean(true));
        let view = collector.get("subject").unwrap();
        assert_eq!(view.count(), 2);
        assert_eq!(
            view.messages(),
            vec![
                "Value is not a string".to_string(),
                "Type must be numeric".to_string()
            ]
        );
    }

    #[test]
    fn test_main_failure_still_runs_after_hooks() {
        let mut registry = RuleRegistry::new();
        registry
            .register("string", |d, v, c: &mut ErrorCollector| {
                c.add("main failed", &v, d);
                v
            })
            .unwrap();
        registry
            .register("after.string:extra", |d, v, c: &mut ErrorCollector| {
                c.add("after ran", &v, d);
                v
            })
            .unwrap();

        let descriptor = Descriptor::Type(TypeDescriptor {
            declared: DeclaredType::String,
            modifiers: vec!["extra".to_string()],
            length: None,
            field: field(),
        });

        let mut collector = ErrorCollector::new();
        execute(&registry, &[descriptor], Value::None, &mut collector).unwrap();

        assert_eq!(
            collector.get("subject").unwrap().messages(),
            vec!["main failed".to_string(), "after ran".to_string()]
        );
    }
}
