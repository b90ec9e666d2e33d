//! Rule registry for managing validation and transform functions.
//!
//! The registry maps a type name to its ordered before/main/after hook
//! chains. It is populated once during setup (built-ins plus caller
//! extensions) and read-only for the rest of its life; validation runs only
//! ever resolve entries out of it.

use crate::core::collector::ErrorCollector;
use crate::core::error::{RegistryError, RegistryResult};
use crate::core::types::Value;
use crate::directive::descriptor::Descriptor;
use indexmap::IndexMap;
use std::sync::Arc;

/// A validation or transform function.
///
/// Takes the descriptor and the current value, returns the (possibly
/// transformed) value, and may append failures to the collector as a side
/// effect. The collector is passed by dependency rather than held as
/// implicit instance state.
pub type RuleFn = Arc<dyn Fn(&Descriptor, Value, &mut ErrorCollector) -> Value + Send + Sync>;

/// Hook chains registered for one type name.
#[derive(Clone, Default)]
pub struct RegistryEntry {
    /// Main chain: every function runs, in registration order.
    pub main: Vec<RuleFn>,
    /// Before hooks by name, insertion order preserved. A hook runs only
    /// when its name appears in the descriptor's modifiers.
    pub before: IndexMap<String, RuleFn>,
    /// After hooks by name, same mechanics as `before`.
    pub after: IndexMap<String, RuleFn>,
}

/// The phase a hook registration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Before,
    After,
}

/// Registry of all validation rules, keyed by type name.
pub struct RuleRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in rule set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::rules::builtin::register_all(&mut registry);
        registry
    }

    /// Register a rule under a pattern.
    ///
    /// Pattern shapes:
    /// - `TYPE` appends to the type's main chain (registrations accumulate,
    ///   they never overwrite).
    /// - `before.TYPE:NAME(|NAME)*` / `after.TYPE:NAME(|NAME)*` registers
    ///   the function under every listed name in that phase's map; an
    ///   existing name is overwritten.
    pub fn register<F>(&mut self, pattern: &str, rule: F) -> RegistryResult<()>
    where
        F: Fn(&Descriptor, Value, &mut ErrorCollector) -> Value + Send + Sync + 'static,
    {
        let rule: RuleFn = Arc::new(rule);

        match pattern.split_once('.') {
            Some((phase_token, rest)) => {
                let phase = match phase_token {
                    "before" => Phase::Before,
                    "after" => Phase::After,
                    _ => {
                        return Err(RegistryError::MalformedPattern {
                            pattern: pattern.to_string(),
                            reason: format!(
                                "unknown phase '{}', expected 'before' or 'after'",
                                phase_token
                            ),
                        })
                    }
                };

                let (type_name, names) =
                    rest.split_once(':')
                        .ok_or_else(|| RegistryError::MissingHookName(pattern.to_string()))?;
                if type_name.is_empty() {
                    return Err(RegistryError::MalformedPattern {
                        pattern: pattern.to_string(),
                        reason: "empty type name".to_string(),
                    });
                }
                if names.split('|').all(|n| n.trim().is_empty()) {
                    return Err(RegistryError::MissingHookName(pattern.to_string()));
                }

                let entry = self.entries.entry(type_name.to_string()).or_default();
                let hooks = match phase {
                    Phase::Before => &mut entry.before,
                    Phase::After => &mut entry.after,
                };
                for name in names.split('|') {
                    let name = name.trim();
                    if !name.is_empty() {
                        hooks.insert(name.to_string(), Arc::clone(&rule));
                    }
                }

                log::debug!("registered {:?} hook '{}' for type '{}'", phase, names, type_name);
            }
            None => {
                if pattern.trim().is_empty() {
                    return Err(RegistryError::MalformedPattern {
                        pattern: pattern.to_string(),
                        reason: "empty type name".to_string(),
                    });
                }
                self.entries
                    .entry(pattern.to_string())
                    .or_default()
                    .main
                    .push(rule);

                log::debug!("registered main rule for type '{}'", pattern);
            }
        }

        Ok(())
    }

    /// Look up the hook chains for a type name.
    pub fn resolve(&self, type_name: &str) -> Option<&RegistryEntry> {
        self.entries.get(type_name)
    }

    /// Check if a type has any registration.
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// All registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Builder for a customized registry.
pub struct RegistryBuilder {
    registry: RuleRegistry,
    include_builtins: bool,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::new(),
            include_builtins: true,
        }
    }

    /// Include or exclude the built-in rule set.
    pub fn with_builtins(mut self, include: bool) -> Self {
        self.include_builtins = include;
        self
    }

    /// Register a custom rule.
    pub fn register<F>(mut self, pattern: &str, rule: F) -> RegistryResult<Self>
    where
        F: Fn(&Descriptor, Value, &mut ErrorCollector) -> Value + Send + Sync + 'static,
    {
        self.registry.register(pattern, rule)?;
        Ok(self)
    }

    /// Build the registry. Built-ins are registered first so custom main
    /// rules run after them and custom hooks can override built-in names.
    pub fn build(self) -> RuleRegistry {
        if self.include_builtins {
            let mut registry = RuleRegistry::with_builtins();
            merge(&mut registry, self.registry);
            registry
        } else {
            self.registry
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn merge(into: &mut RuleRegistry, from: RuleRegistry) {
    for (type_name, entry) in from.entries {
        let target = into.entries.entry(type_name).or_default();
        target.main.extend(entry.main);
        for (name, rule) in entry.before {
            target.before.insert(name, rule);
        }
        for (name, rule) in entry.after {
            target.after.insert(name, rule);
        }
    }
}
