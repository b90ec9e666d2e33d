//! Parsed, structured form of a validation directive.
//!
//! One descriptor is produced per directive string. A field may carry
//! several directives; each yields an independent descriptor and they are
//! executed in source order.

use crate::core::types::FieldRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four declared types a `type(...)` directive may name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    /// True integers only; numeric strings need the `cast` hook.
    Int,
    /// String values.
    String,
    /// Float values, optionally with an exact decimal-place count.
    Float,
    /// Integers, finite floats and numeric strings.
    Numeric,
}

impl DeclaredType {
    /// Parse a declared-type token (already lowercased by the parser).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "int" => Some(DeclaredType::Int),
            "string" => Some(DeclaredType::String),
            "float" => Some(DeclaredType::Float),
            "numeric" => Some(DeclaredType::Numeric),
            _ => None,
        }
    }

    /// The registry key this type resolves under.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::String => "string",
            DeclaredType::Float => "float",
            DeclaredType::Numeric => "numeric",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptor for a `type(TYPE:MODS, LEN)` directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDescriptor {
    /// Declared type selecting the registry entry.
    pub declared: DeclaredType,
    /// Modifier tokens in declaration order, duplicates dropped.
    pub modifiers: Vec<String>,
    /// Optional length/bound argument. Absent is not zero.
    pub length: Option<u64>,
    /// Field attribution handle.
    pub field: FieldRef,
}

impl TypeDescriptor {
    /// Check whether a modifier token was declared.
    pub fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.iter().any(|m| m == name)
    }
}

/// Descriptor for a `match(PATTERN)` directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchDescriptor {
    /// Verbatim regex pattern, validated at parse time.
    pub pattern: String,
    /// Field attribution handle.
    pub field: FieldRef,
}

/// Descriptor for a `replace(PATTERN, REPLACEMENT)` directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaceDescriptor {
    /// Verbatim regex pattern, validated at parse time.
    pub pattern: String,
    /// Substitution text; `${n}` refers to capture group n.
    pub replacement: String,
    /// Field attribution handle.
    pub field: FieldRef,
}

/// A parsed directive, immutable once built.
///
/// Each variant carries only the fields relevant to its kind, replacing the
/// single loosely-typed record a dynamic implementation would share across
/// all three.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Descriptor {
    /// `type(...)`: declared-type check with optional hooks and length.
    Type(TypeDescriptor),
    /// `match(...)`: regex must match the value.
    Match(MatchDescriptor),
    /// `replace(...)`: regex substitution transform.
    Replace(ReplaceDescriptor),
}

impl Descriptor {
    /// The rule-registry key this descriptor resolves under. `match` and
    /// `replace` are synthetic types for lookup purposes.
    pub fn type_key(&self) -> &str {
        match self {
            Descriptor::Type(t) => t.declared.as_str(),
            Descriptor::Match(_) => "match",
            Descriptor::Replace(_) => "replace",
        }
    }

    /// Modifier tokens selecting optional before/after hooks. Only
    /// `type(...)` directives carry modifiers.
    pub fn modifiers(&self) -> &[String] {
        match self {
            Descriptor::Type(t) => &t.modifiers,
            _ => &[],
        }
    }

    /// Optional length argument, when the directive declared one.
    pub fn length(&self) -> Option<u64> {
        match self {
            Descriptor::Type(t) => t.length,
            _ => None,
        }
    }

    /// Field attribution handle.
    pub fn field(&self) -> &FieldRef {
        match self {
            Descriptor::Type(t) => &t.field,
            Descriptor::Match(m) => &m.field,
            Descriptor::Replace(r) => &r.field,
        }
    }
}
