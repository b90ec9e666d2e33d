//! Pipeline module.
//!
//! Contains the executor that runs descriptor chains and the `Validator`
//! facade that ties parsing, execution and error collection together.

pub mod executor;
pub mod validator;

pub use executor::{execute, Executor};
pub use validator::Validator;
