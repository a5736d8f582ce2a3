//! Checkpoint error types.

use thiserror::Error;

/// Errors from saving or restoring interpreter state.
///
/// A failed restore never changes the interpreter.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The state could not be written, e.g. a non-finite float variable in
    /// the JSON blob
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The blob is not valid JSON, lacks `CurrentState`, or the binary
    /// snapshot is truncated or corrupt
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Binary snapshot carries a format version this build cannot read
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
