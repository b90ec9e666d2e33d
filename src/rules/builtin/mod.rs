//! Built-in rule implementations.
//!
//! This module contains the standard rule set that ships with Vigil,
//! registered into a [`RuleRegistry`] at initialization.

mod numeric;
mod pattern;
mod string;

use crate::rules::registry::RuleRegistry;

/// Register all built-in rules.
pub fn register_all(registry: &mut RuleRegistry) {
    string::register(registry);
    numeric::register(registry);
    pattern::register(registry);
}
