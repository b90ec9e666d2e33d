//! Core value types that flow through the validation pipeline.
//!
//! The type system uses an enum-based approach for several reasons:
//! - Closed set of types: field validation deals with a finite set of value shapes
//! - Zero-cost pattern matching: the compiler optimizes to jump tables
//! - Serialization: serde handles enums natively
//! - Type safety: exhaustive matching catches missing cases at compile time

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A candidate value submitted for validation.
///
/// This enum represents all possible data shapes a field can hold before
/// validation has had a chance to reject or transform them. Using an enum
/// provides compile-time type safety and efficient pattern matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Homogeneous array of values
    Array(Vec<Value>),
    /// Key-value map
    Map(HashMap<String, Value>),
    /// Represents absence of value
    None,
}

/// Shape tags for values, used in type checks and diagnostics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point number
    Float,
    /// UTF-8 string
    String,
    /// Boolean value
    Boolean,
    /// Homogeneous array of values
    Array,
    /// Key-value map
    Map,
    /// Absence of value
    None,
}

// ============================================================================
// Value Implementation
// ============================================================================

impl Value {
    /// Get the shape tag of this value.
    pub fn get_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::None => ValueType::None,
        }
    }

    /// Try to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Try to get this value as a float.
    /// Integers are automatically converted to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Try to get this value as an array reference.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if let Value::Array(arr) = self {
            Some(arr)
        } else {
            None
        }
    }

    /// Try to get this value as a map reference.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        if let Value::Map(map) = self {
            Some(map)
        } else {
            None
        }
    }

    /// Check if this value is None.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Attempt a lossless string coercion of this value.
    ///
    /// Scalars (strings, booleans, integers, floats) coerce; containers and
    /// `None` do not. Used by the `cast` hook, which swallows the failure
    /// case and passes the value through unchanged.
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// Check whether this value passes a numeric test.
    ///
    /// Integers and floats are numeric. Strings are numeric when they parse
    /// to a finite number (decimal or exponent notation; hex and binary
    /// literals are not accepted in string form).
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Integer(_) => true,
            Value::Float(f) => f.is_finite(),
            Value::String(s) => {
                let trimmed = s.trim();
                // parse::<f64> accepts "inf"/"nan" spellings; is_finite
                // rejects them. Hex and binary literals fail the parse.
                !trimmed.is_empty()
                    && !trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
                    && trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Array(arr) => write!(f, "Array[{}]", arr.len()),
            Value::Map(map) => write!(f, "Map{{{} entries}}", map.len()),
            Value::None => write!(f, "None"),
        }
    }
}

// ============================================================================
// ValueType Implementation
// ============================================================================

impl ValueType {
    /// Get a human-readable name for this type.
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
            ValueType::Map => "map",
            ValueType::None => "none",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// FieldRef
// ============================================================================

/// Handle to the field being validated.
///
/// Carries only what error attribution needs: the owning type's label and
/// the field name. The engine never reads through it to reach a host object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FieldRef {
    /// Label of the owning type (host struct, model, record).
    pub class: String,
    /// Name of the field within the owning type.
    pub name: String,
}

impl FieldRef {
    /// Create a field reference.
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.class, self.name)
        }
    }
}
