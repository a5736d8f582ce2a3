//! Builder API for ergonomic interpreter construction.
//!
//! This module provides a fluent builder for interpreters and the
//! `variables!` macro for seeding a variable store.

pub mod error;
pub mod interpreter;
pub mod macros;

pub use error::BuildError;
pub use interpreter::InterpreterBuilder;
