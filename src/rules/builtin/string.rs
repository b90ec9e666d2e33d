//! String rules: the `string` main check, the `cast` coercion hook, and the
//! character-class and casing after-hooks.

use crate::core::collector::ErrorCollector;
use crate::core::types::Value;
use crate::directive::descriptor::Descriptor;
use crate::rules::registry::RuleRegistry;
use once_cell::sync::Lazy;
use regex::Regex;

static SNAKE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)+").expect("valid casing pattern"));
static CONSTANT_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+(_[A-Z0-9]+)+").expect("valid casing pattern"));
static KEBAB_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)+").expect("valid casing pattern"));
static COBOL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+(-[A-Z0-9]+)+").expect("valid casing pattern"));
static CAMEL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+([A-Z][a-z][a-zA-Z0-9]*)+$").expect("valid casing pattern"));
static PASCAL_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]+[a-z]*[0-9]*([A-Z][a-z][a-zA-Z0-9]*)+$").expect("valid casing pattern")
});

/// Register the string rules.
pub fn register(registry: &mut RuleRegistry) {
    registry
        .register("string", check_string)
        .expect("built-in pattern is well formed");
    registry
        .register("before.string:cast", cast_to_string)
        .expect("built-in pattern is well formed");
    registry
        .register(
            "after.string:alnum|alphanum|alphanumeric",
            check_alphanumeric,
        )
        .expect("built-in pattern is well formed");
    registry
        .register("after.string:alpha", check_alpha)
        .expect("built-in pattern is well formed");

    registry
        .register(
            "after.string:snakecase",
            casing_rule(&SNAKE_CASE, "Value was not in snakecase (snake_case)"),
        )
        .expect("built-in pattern is well formed");
    registry
        .register(
            "after.string:constantcase|uppersnakecase|macrocase",
            casing_rule(&CONSTANT_CASE, "Value was not in constantcase (CONSTANT_CASE)"),
        )
        .expect("built-in pattern is well formed");
    registry
        .register(
            "after.string:kebabcase",
            casing_rule(&KEBAB_CASE, "Value was not in kebabcase (kebab-case)"),
        )
        .expect("built-in pattern is well formed");
    registry
        .register(
            "after.string:cobolcase|upperkebabcase",
            casing_rule(&COBOL_CASE, "Value was not in cobol case (COBOL-CASE)"),
        )
        .expect("built-in pattern is well formed");
    registry
        .register(
            "after.string:camelcase",
            casing_rule(&CAMEL_CASE, "Value is not in camel case (camelCase)"),
        )
        .expect("built-in pattern is well formed");
    registry
        .register(
            "after.string:pascalcase|camelcaps|studlycaps",
            casing_rule(&PASCAL_CASE, "Value is not in Pascal case (PascalCase)"),
        )
        .expect("built-in pattern is well formed");
}

/// `string` main: the value must already be a string.
fn check_string(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    if value.as_string().is_none() {
        collector.add("Value is not a string", &value, descriptor);
    }
    value
}

/// `before.string:cast`: coerce scalars to a string. A value that cannot be
/// coerced passes through untouched; the failure is swallowed and the main
/// check flags it instead.
fn cast_to_string(_descriptor: &Descriptor, value: Value, _collector: &mut ErrorCollector) -> Value {
    match value.coerce_string() {
        Some(s) => Value::String(s),
        None => value,
    }
}

/// `after.string:alnum` and aliases: letters and digits only.
fn check_alphanumeric(
    descriptor: &Descriptor,
    value: Value,
    collector: &mut ErrorCollector,
) -> Value {
    if let Some(s) = value.as_string() {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            collector.add(
                "Value must be alphanumeric (letters and numbers only)",
                &value,
                descriptor,
            );
        }
    }
    value
}

/// `after.string:alpha`: letters only.
fn check_alpha(descriptor: &Descriptor, value: Value, collector: &mut ErrorCollector) -> Value {
    if let Some(s) = value.as_string() {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            collector.add("Type must be alphabet characters only", &value, descriptor);
        }
    }
    value
}

/// Build an after-hook that checks a string against a casing pattern.
///
/// Non-string values are skipped silently: the main phase already recorded
/// the type failure and the hooks must not pile on.
fn casing_rule(
    pattern: &'static Lazy<Regex>,
    message: &'static str,
) -> impl Fn(&Descriptor, Value, &mut ErrorCollector) -> Value {
    move |descriptor, value, collector| {
        if let Some(s) = value.as_string() {
            if !pattern.is_match(s) {
                collector.add(message, &value, descriptor);
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldRef;
    use crate::directive::descriptor::{DeclaredType, TypeDescriptor};

    fn string_descriptor(modifiers: &[&str]) -> Descriptor {
        Descriptor::Type(TypeDescriptor {
            declared: DeclaredType::String,
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            length: None,
            field: FieldRef::new("Stub", "subject"),
        })
    }

    fn run(
        rule: impl Fn(&Descriptor, Value, &mut ErrorCollector) -> Value,
        value: Value,
    ) -> (Value, ErrorCollector) {
        let mut collector = ErrorCollector::new();
        let out = rule(&string_descriptor(&[]), value, &mut collector);
        (out, collector)
    }

    #[test]
    fn test_check_string_rejects_non_strings() {
        for value in [
            Value::Boolean(true),
            Value::Boolean(false),
            Value::Integer(123),
            Value::Float(1.23),
            Value::None,
            Value::Array(vec![]),
        ] {
            let (_, collector) = run(check_string, value);
            assert_eq!(collector.len(), 1);
            let mut view = collector.get("subject").unwrap();
            assert_eq!(view.first().message, "Value is not a string");
        }
    }

    #[test]
    fn test_check_string_passes_strings() {
        let (out, collector) = run(check_string, Value::String("a string".to_string()));
        assert!(collector.is_valid());
        assert_eq!(out, Value::String("a string".to_string()));
    }

    #[test]
    fn test_cast_coerces_scalars() {
        let cases = [
            (Value::Boolean(true), "true"),
            (Value::Boolean(false), "false"),
            (Value::Integer(123), "123"),
            (Value::Float(1.5), "1.5"),
        ];
        for (value, expected) in cases {
            let (out, collector) = run(cast_to_string, value);
            assert!(collector.is_valid());
            assert_eq!(out, Value::String(expected.to_string()));
        }
    }

    #[test]
    fn test_cast_swallows_uncastable() {
        let (out, collector) = run(cast_to_string, Value::Array(vec![Value::Integer(1)]));
        assert!(collector.is_valid());
        assert_eq!(out, Value::Array(vec![Value::Integer(1)]));
    }

    #[test]
    fn test_alphanumeric() {
        for good in ["iAmAlphanumeric", "iAmAlphanumeric123", "123IAmAlphanumeric", "123"] {
            let (_, collector) = run(check_alphanumeric, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be alphanumeric", good);
        }
        for bad in [
            "i_am_not_alphanumeric",
            "i-am-not-alphanumeric123",
            "i.am.not.alphanumeric",
            "i am not alphanumeric",
            "iAmNotAlphanumeric!",
            "",
        ] {
            let (_, collector) = run(check_alphanumeric, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be alphanumeric", bad);
        }
    }

    #[test]
    fn test_alpha() {
        for good in ["abc", "ABC", "abcDEF"] {
            let (_, collector) = run(check_alpha, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be alpha", good);
        }
        for bad in ["1234567890", "0x539", "", "abc123"] {
            let (_, collector) = run(check_alpha, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be alpha", bad);
        }
    }

    #[test]
    fn test_snake_case() {
        let rule = casing_rule(&SNAKE_CASE, "Value was not in snakecase (snake_case)");
        for good in ["snake_case", "i_am_a_long_snake_case_string", "a_1_b_2"] {
            let (_, collector) = run(&rule, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be snake_case", good);
        }
        for bad in [
            "kebab-case",
            "UPPER_SNAKE_CASE",
            "Camel_Snake_Case",
            "camelCase",
            "flatcase",
            "snake__case_with_too_many_underscores",
        ] {
            let (_, collector) = run(&rule, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be snake_case", bad);
        }
    }

    #[test]
    fn test_constant_case() {
        let rule = casing_rule(&CONSTANT_CASE, "Value was not in constantcase (CONSTANT_CASE)");
        for good in ["UPPER_SNAKE_CASE", "MACRO_CASE", "CONSTANT_CASE_123"] {
            let (_, collector) = run(&rule, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be CONSTANT_CASE", good);
        }
        for bad in ["snake_case", "Camel_Snake_Case", "UPPERFLATCASE", "kebab-case"] {
            let (_, collector) = run(&rule, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be CONSTANT_CASE", bad);
        }
    }

    #[test]
    fn test_kebab_case() {
        let rule = casing_rule(&KEBAB_CASE, "Value was not in kebabcase (kebab-case)");
        for good in ["kebab-case", "i-am-a-long-kebab-case-string-123"] {
            let (_, collector) = run(&rule, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be kebab-case", good);
        }
        for bad in [
            "snake_case",
            "COBOL-CASE",
            "Train-Case",
            "flatcase",
            "kebab--case-with-too-many-dashes",
        ] {
            let (_, collector) = run(&rule, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be kebab-case", bad);
        }
    }

    #[test]
    fn test_cobol_case() {
        let rule = casing_rule(&COBOL_CASE, "Value was not in cobol case (COBOL-CASE)");
        for good in ["COBOL-CASE", "UPPER-KEBAB-CASE", "COBOL-CASE-123"] {
            let (_, collector) = run(&rule, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be COBOL-CASE", good);
        }
        for bad in ["kebab-case", "Train-Case", "UPPERFLATCASE", "snake_case"] {
            let (_, collector) = run(&rule, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be COBOL-CASE", bad);
        }
    }

    #[test]
    fn test_camel_case() {
        let rule = casing_rule(&CAMEL_CASE, "Value is not in camel case (camelCase)");
        for good in ["camelCase", "testSomeMethod", "reallyLongCamelCase"] {
            let (_, collector) = run(&rule, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be camelCase", good);
        }
        for bad in ["CamelCaps", "snake_case", "kebab-case", "flatcase", "UPPERFLATCASE"] {
            let (_, collector) = run(&rule, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be camelCase", bad);
        }
    }

    #[test]
    fn test_pascal_case() {
        let rule = casing_rule(&PASCAL_CASE, "Value is not in Pascal case (PascalCase)");
        for good in ["PascalCase", "StudlyCapsValue", "Pascal2Case"] {
            let (_, collector) = run(&rule, Value::String(good.to_string()));
            assert!(collector.is_valid(), "{} should be PascalCase", good);
        }
        for bad in ["camelCaps", "snake_case", "Train-Case", "UPPERFLATCASE", "flatcase"] {
            let (_, collector) = run(&rule, Value::String(bad.to_string()));
            assert!(!collector.is_valid(), "{} should not be PascalCase", bad);
        }
    }

    #[test]
    fn test_after_hooks_skip_non_strings() {
        let rule = casing_rule(&SNAKE_CASE, "Value was not in snakecase (snake_case)");
        let (_, collector) = run(&rule, Value::Integer(42));
        assert!(collector.is_valid());

        let (_, collector) = run(check_alphanumeric, Value::Integer(42));
        assert!(collector.is_valid());
    }
}
