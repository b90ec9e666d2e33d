//! Directive grammar: the textual wire format and its parsed form.
//!
//! A directive is a single validation instruction attached to a field,
//! e.g. `type(int:unsigned)` or `match(^[a-z]+$)`.

pub mod descriptor;
pub mod parser;

pub use descriptor::{
    DeclaredType, Descriptor, MatchDescriptor, ReplaceDescriptor, TypeDescriptor,
};
pub use parser::parse;
