//! Rule module.
//!
//! Contains the rule registry and the built-in rule set.

pub mod builtin;
pub mod registry;

pub use registry::{RegistryBuilder, RegistryEntry, RuleFn, RuleRegistry};
