//! Pattern rules: the `match` check and the `replace` transform.
//!
//! Both are synthetic types in the registry; their descriptors carry the
//! pattern text, validated when the directive was parsed.

use crate::core::collector::ErrorCollector;
use crate::core::types::Value;
use crate::directive::descriptor::Descriptor;
use crate::rules::registry::RuleRegistry;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

/// Compile-once cache keyed by pattern text. Descriptors only carry the
/// pattern string, so repeated runs of the same directive reuse the
/// compiled regex instead of rebuilding it per value.
static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Fetch the compiled form of a pattern, compiling and caching on first
/// use. Parsed directives were validated already; a hand-built descriptor
/// can still carry a broken pattern, which yields `None` here.
fn compiled(pattern: &str) -> Option<Regex> {
    let mut cache = PATTERN_CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Some(re.clone());
    }

    match Regex::new(pattern) {
        Ok(re) => {
            cache.insert(pattern.to_string(), re.clone());
            Some(re)
        }
        Err(e) => {
            log::warn!("pattern '{}' failed to compile: {}", pattern, e);
            None
        }
    }
}

/// Register the pattern rules.
pub fn register(registry: &mut RuleRegistry) {
    registry
        .register("match", check_match)
        .expect("built-in pattern is well formed");
    registry
        .register("replace", apply_replace)
        .expect("built-in pattern is well formed");
}

/// `match` main: the value must match the descriptor's pattern. Non-string
/// values never match.
fn check_match(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    let Descriptor::Match(spec) = descriptor else {
        return value;
    };

    let matched = match (compiled(&spec.pattern), value.as_string()) {
        (Some(re), Some(s)) => re.is_match(s),
        _ => false,
    };

    if !matched {
        collector.add("Value did not match pattern", &value, descriptor);
    }
    value
}

/// `replace` main: regex substitution over string values. `${n}` in the
/// replacement refers to capture group n. Never records a failure; values
/// this transform cannot touch pass through unchanged.
fn apply_replace(descriptor: &Descriptor, value: Value, _collector: &mut ErrorCollector) -> Value {
    let Descriptor::Replace(spec) = descriptor else {
        return value;
    };

    match (compiled(&spec.pattern), value.as_string()) {
        (Some(re), Some(s)) => {
            let replaced = re.replace_all(s, spec.replacement.as_str()).into_owned();
            Value::String(replaced)
        }
        _ => value,
    }
}
