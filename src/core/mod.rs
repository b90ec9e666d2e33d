//! Core types for the Vigil validation engine.
//!
//! This module contains the foundational types the rest of the pipeline is
//! built on:
//! - Value types (Integer, Float, String, etc.) and field references
//! - Error types
//! - The error collector and its cursor view

pub mod collector;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use collector::{ErrorCollection, ErrorCollector, ValidationFailure};
pub use error::{CollectorError, DirectiveError, RegistryError, VigilError};
pub use types::{FieldRef, Value, ValueType};
