//! # Vigil - Declarative Value Validation
//!
//! Vigil is a declarative validation library. Values are checked and
//! transformed by a pipeline driven from short directive strings such as
//! `type(int:unsigned, 10)` or `match(^[a-z]+$)`, so a host object can keep
//! its validation rules next to the fields they guard.
//!
//! ## Features
//!
//! - **Directive Strings**: `type(...)`, `match(...)` and `replace(...)`
//!   directives parsed into structured descriptors
//! - **Rule Registry**: Before/main/after hook chains per declared type,
//!   extensible with custom rules
//! - **Accumulating Errors**: Failures collect per field instead of aborting,
//!   and a cursor view walks them in insertion order
//! - **Transforms**: Cast and replace rules rewrite the value as it flows
//!   through the pipeline
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vigil::prelude::*;
//!
//! let mut validator = Validator::new("User");
//!
//! // Cast the raw string, then enforce an unsigned id no greater than 10
//! let id = validator.validate(
//!     "id",
//!     &["type(int:cast|unsigned, 10)"],
//!     Value::String("7".to_string()),
//! )?;
//! assert_eq!(id, Value::Integer(7));
//! assert!(validator.is_valid());
//!
//! // Failures accumulate per field and are walked with a cursor
//! validator.validate("name", &["type(string)"], Value::Integer(42))?;
//! let mut errors = validator.errors("name")?;
//! println!("{}", errors.first().message);
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`core`]: Value model, error types and the error collector
//! - [`directive`]: Directive grammar, parser and descriptors
//! - [`rules`]: Rule registry and the built-in rule set
//! - [`pipeline`]: Executor and the `Validator` facade
//!
//! ## Custom Rules
//!
//! A rule is any `Fn(&Descriptor, Value, &mut ErrorCollector) -> Value`.
//! Register one under a pattern to extend a type:
//!
//! ```rust,ignore
//! use vigil::prelude::*;
//!
//! let mut validator = Validator::new("Account");
//! validator.register_rule("after.string:password", |descriptor, value, collector| {
//!     if let Some(s) = value.as_string() {
//!         if s.len() < 8 {
//!             collector.add(
//!                 "Password must be at least 8 characters in length",
//!                 &value,
//!                 descriptor,
//!             );
//!         }
//!     }
//!     value
//! })?;
//!
//! validator.validate("password", &["type(string:password)"], password)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod directive;
pub mod pipeline;
pub mod rules;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use vigil::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{FieldRef, Value, ValueType};

    // Errors
    pub use crate::core::error::{
        CollectorError, DirectiveError, RegistryError, VigilError, VigilResult,
    };

    // Error collection
    pub use crate::core::collector::{ErrorCollection, ErrorCollector, ValidationFailure};

    // Directives
    pub use crate::directive::descriptor::{
        DeclaredType, Descriptor, MatchDescriptor, ReplaceDescriptor, TypeDescriptor,
    };
    pub use crate::directive::parser::parse;

    // Rules
    pub use crate::rules::registry::{RegistryBuilder, RegistryEntry, RuleFn, RuleRegistry};

    // Pipeline
    pub use crate::pipeline::executor::{execute, Executor};
    pub use crate::pipeline::validator::Validator;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
