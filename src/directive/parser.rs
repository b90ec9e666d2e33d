//! Directive string parser.
//!
//! Turns one raw directive string into a typed [`Descriptor`]. The grammar
//! is the engine's wire format: deviations are syntax errors, not tolerant
//! parses.
//!
//! ```text
//! type(TYPE)
//! type(TYPE:MOD(|MOD)*)
//! type(TYPE,LEN)
//! type(TYPE:MOD(|MOD)*,LEN)
//! match(PATTERN)
//! replace(PATTERN,REPLACEMENT)
//! ```
//!
//! Keywords and the TYPE token are case-insensitive; modifier tokens are
//! kept verbatim. For `match` the pattern is the verbatim interior up to
//! the directive's closing paren, so internal parens are fine. For
//! `replace` the interior splits at its first comma, which means patterns
//! containing a literal comma are not expressible in this grammar.

use crate::core::error::{DirectiveError, ParseResult};
use crate::core::types::FieldRef;
use crate::directive::descriptor::{
    DeclaredType, Descriptor, MatchDescriptor, ReplaceDescriptor, TypeDescriptor,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// `type(TYPE)`, `type(TYPE:MODS)`, `type(TYPE,LEN)`, `type(TYPE:MODS,LEN)`.
static TYPE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^type\(\s*([a-z]*)\s*(?::([^,)]*))?(?:,\s*([0-9]+)\s*)?\)$")
        .expect("type directive grammar is a valid regex")
});

/// Parse one directive string into a descriptor for the given field.
pub fn parse(directive: &str, field: FieldRef) -> ParseResult<Descriptor> {
    let trimmed = directive.trim();
    let lowered = trimmed.to_ascii_lowercase();

    let descriptor = if lowered.starts_with("type(") {
        parse_type(trimmed, field)?
    } else if lowered.starts_with("match(") {
        parse_match(trimmed, field)?
    } else if lowered.starts_with("replace(") {
        parse_replace(trimmed, field)?
    } else {
        return Err(DirectiveError::Unrecognized(trimmed.to_string()));
    };

    log::debug!("parsed directive '{}' as {} descriptor", trimmed, descriptor.type_key());
    Ok(descriptor)
}

fn parse_type(directive: &str, field: FieldRef) -> ParseResult<Descriptor> {
    let captures = TYPE_DIRECTIVE
        .captures(directive)
        .ok_or_else(|| DirectiveError::Malformed(directive.to_string()))?;

    let type_token = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    if type_token.is_empty() {
        return Err(DirectiveError::EmptyType(directive.to_string()));
    }

    let declared = DeclaredType::from_token(&type_token.to_ascii_lowercase()).ok_or_else(|| {
        DirectiveError::UnknownType {
            directive: directive.to_string(),
            declared: type_token.to_string(),
        }
    })?;

    // Ordered set: declaration order kept, duplicates dropped
    let mut modifiers: Vec<String> = Vec::new();
    if let Some(mods) = captures.get(2) {
        for token in mods.as_str().split('|') {
            let token = token.trim();
            if !token.is_empty() && !modifiers.iter().any(|m| m == token) {
                modifiers.push(token.to_string());
            }
        }
    }

    let length = match captures.get(3) {
        Some(m) => Some(
            m.as_str()
                .parse::<u64>()
                .map_err(|_| DirectiveError::Malformed(directive.to_string()))?,
        ),
        None => None,
    };

    Ok(Descriptor::Type(TypeDescriptor {
        declared,
        modifiers,
        length,
        field,
    }))
}

fn parse_match(directive: &str, field: FieldRef) -> ParseResult<Descriptor> {
    let pattern = interior(directive, "match(")?;
    compile_check(directive, pattern)?;

    Ok(Descriptor::Match(MatchDescriptor {
        pattern: pattern.to_string(),
        field,
    }))
}

fn parse_replace(directive: &str, field: FieldRef) -> ParseResult<Descriptor> {
    let inner = interior(directive, "replace(")?;
    let (pattern, replacement) = inner
        .split_once(',')
        .ok_or_else(|| DirectiveError::MissingReplacement(directive.to_string()))?;
    compile_check(directive, pattern)?;

    Ok(Descriptor::Replace(ReplaceDescriptor {
        pattern: pattern.to_string(),
        replacement: replacement.trim_start().to_string(),
        field,
    }))
}

/// Strip `keyword(` and the trailing `)`, returning the verbatim interior.
fn interior<'a>(directive: &'a str, prefix: &str) -> ParseResult<&'a str> {
    let rest = &directive[prefix.len()..];
    rest.strip_suffix(')')
        .ok_or_else(|| DirectiveError::Malformed(directive.to_string()))
}

/// Patterns are compiled eagerly: a regex the caller got wrong is broken
/// setup, which must fail the validate call rather than flag the value.
fn compile_check(directive: &str, pattern: &str) -> ParseResult<()> {
    Regex::new(pattern).map(|_| ()).map_err(|e| DirectiveError::InvalidPattern {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}
