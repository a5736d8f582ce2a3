//! Definition loading errors.

use thiserror::Error;

/// Errors raised while loading a workflow definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The text is not JSON, or does not have the definition's shape
    /// (missing `StartAt`/`States`, wrongly typed fields).
    #[error("Failed to parse state machine definition: {0}")]
    Parse(#[from] serde_json::Error),
}
