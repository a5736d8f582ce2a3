//! Build errors for the interpreter builder.

use crate::core::DefinitionError;
use thiserror::Error;

/// Errors that can occur when building an interpreter.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Task handler not specified. Call .handler(handler) before .build()")]
    MissingHandler,

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}
