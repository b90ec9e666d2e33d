//! Numeric rules: the `int`, `float` and `numeric` main checks, the integer
//! `cast` hook and the `unsigned` bound hook.

use crate::core::collector::ErrorCollector;
use crate::core::types::Value;
use crate::directive::descriptor::Descriptor;
use crate::rules::registry::RuleRegistry;

/// Register the numeric rules.
pub fn register(registry: &mut RuleRegistry) {
    registry
        .register("int", check_int)
        .expect("built-in pattern is well formed");
    registry
        .register("before.int:cast", cast_to_int)
        .expect("built-in pattern is well formed");
    registry
        .register("after.int:unsigned", check_unsigned)
        .expect("built-in pattern is well formed");
    registry
        .register("float", check_float)
        .expect("built-in pattern is well formed");
    registry
        .register("numeric", check_numeric)
        .expect("built-in pattern is well formed");
}

/// `int` main: the value must be a true integer. A numeric string is not
/// accepted; route it through the `cast` hook first.
fn check_int(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    if value.as_integer().is_none() {
        collector.add("Value is not an integer", &value, descriptor);
    }
    value
}

/// `before.int:cast`: convert a numeric string to an integer. Float-shaped
/// strings truncate toward zero; non-numeric strings and every other shape
/// pass through unchanged.
fn cast_to_int(_descriptor: &Descriptor, value: Value, _collector: &mut ErrorCollector) -> Value {
    if let Value::String(s) = &value {
        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Value::Integer(f.trunc() as i64);
            }
        }
    }
    value
}

/// `after.int:unsigned`: the value must satisfy `abs(value) == value`, so
/// zero is unsigned. With a declared length the value must also stay at or
/// under it. Non-integer values pass through; the main check flagged them.
fn check_unsigned(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    if let Value::Integer(n) = value {
        if n < 0 {
            collector.add(
                "Value must be unsigned (a positive number)",
                &value,
                descriptor,
            );
        }
        if let Some(max) = descriptor.length() {
            if n > 0 && n as u64 > max {
                collector.add(format!("Max value is {}", max), &value, descriptor);
            }
        }
    }
    value
}

/// `float` main: the value must be a float. When the directive declared a
/// length, the decimal-place count must equal it exactly.
fn check_float(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    match value {
        Value::Float(f) => {
            if let Some(places) = descriptor.length() {
                if decimal_places(f) != places {
                    collector.add(
                        format!("Value must have exactly {} decimal places", places),
                        &value,
                        descriptor,
                    );
                }
            }
        }
        _ => collector.add("Type must be float", &value, descriptor),
    }
    value
}

/// `numeric` main: integers, finite floats and numeric strings pass.
fn check_numeric(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    if !value.is_numeric() {
        collector.add("Type must be numeric", &value, descriptor);
    }
    value
}

/// Count the decimal places of a float via its shortest display form.
/// `1.23` has two, `1.0` displays as `1` and has none.
fn decimal_places(f: f64) -> u64 {
    let rendered = format!("{}", f);
    rendered
        .split_once('.')
        .map(|(_, decimals)| decimals.len() as u64)
        .unwrap_or(0)
}
