//! Saving and restoring interpreter state.
//!
//! A checkpoint holds the variable store and the execution cursor. It does
//! NOT include the definition: reload the same definition with
//! [`Interpreter::setup`] before restoring, or the restored cursor may name
//! a state that no longer exists and the next `run` reports `INVALID_STATE`.
//!
//! Two encodings are offered. The JSON text form is the interchange format:
//!
//! ```json
//! {"GlobalState": {"v": "hot"}, "CurrentState": "E",
//!  "WaitUntil": 6000, "RecommendedDelay": 5000}
//! ```
//!
//! The binary form is a compact `bincode` encoding of the same fields,
//! prefixed with [`CHECKPOINT_VERSION`], for small persistent stores.

use crate::core::{Cursor, Value, Variables};
use crate::engine::{Clock, Interpreter, TaskHandler};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

pub mod error;

pub use error::CheckpointError;

/// Version identifier for the binary checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

fn is_false(value: &bool) -> bool {
    !*value
}

/// `"GlobalState": null` reads as an empty store.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Variables, D::Error> {
    Option::<Variables>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Serializable snapshot of the variables and cursor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(rename = "GlobalState", default, deserialize_with = "null_as_empty")]
    pub global_state: Variables,

    #[serde(rename = "CurrentState")]
    pub current_state: String,

    #[serde(rename = "WaitUntil", default)]
    pub wait_until: u64,

    #[serde(rename = "RecommendedDelay", default)]
    pub recommended_delay: u64,

    /// Only written once the workflow has ended.
    #[serde(rename = "Finished", default, skip_serializing_if = "is_false")]
    pub finished: bool,
}

impl Checkpoint {
    pub fn new(cursor: Cursor, global_state: Variables) -> Self {
        Self {
            global_state,
            current_state: cursor.current_state,
            wait_until: cursor.wait_until,
            recommended_delay: cursor.recommended_delay,
            finished: cursor.finished,
        }
    }

    /// Split back into the parts an interpreter holds.
    pub fn into_parts(self) -> (Cursor, Variables) {
        let cursor = Cursor {
            current_state: self.current_state,
            wait_until: self.wait_until,
            recommended_delay: self.recommended_delay,
            finished: self.finished,
        };
        (cursor, self.global_state)
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(text)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        let global_state = self
            .global_state
            .iter()
            .map(|(name, value)| {
                StoredValue::try_from(value).map(|stored| (name.to_string(), stored))
            })
            .collect::<Result<Vec<_>, CheckpointError>>()?;

        let binary = BinaryCheckpoint {
            version: CHECKPOINT_VERSION,
            global_state,
            current_state: self.current_state.clone(),
            wait_until: self.wait_until,
            recommended_delay: self.recommended_delay,
            finished: self.finished,
        };

        bincode::serialize(&binary).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let header: VersionHeader = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        if header.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: header.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let binary: BinaryCheckpoint = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;

        let global_state = binary
            .global_state
            .into_iter()
            .map(|(name, value)| Value::try_from(value).map(|value| (name, value)))
            .collect::<Result<Variables, CheckpointError>>()?;

        Ok(Self {
            global_state,
            current_state: binary.current_state,
            wait_until: binary.wait_until,
            recommended_delay: binary.recommended_delay,
            finished: binary.finished,
        })
    }
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct BinaryCheckpoint {
    version: u32,
    global_state: Vec<(String, StoredValue)>,
    current_state: String,
    wait_until: u64,
    recommended_delay: u64,
    finished: bool,
}

/// Externally tagged mirror of [`Value`]; bincode cannot decode a
/// self-describing value. Structured values travel as JSON text.
#[derive(Serialize, Deserialize)]
enum StoredValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Json(String),
}

impl TryFrom<&Value> for StoredValue {
    type Error = CheckpointError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Integer(n) => Self::Integer(*n),
            Value::Float(f) => Self::Float(*f),
            Value::String(s) => Self::String(s.clone()),
            Value::Json(json) => Self::Json(
                serde_json::to_string(json)
                    .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))?,
            ),
        })
    }
}

impl TryFrom<StoredValue> for Value {
    type Error = CheckpointError;

    fn try_from(value: StoredValue) -> Result<Self, Self::Error> {
        Ok(match value {
            StoredValue::Null => Self::Null,
            StoredValue::Bool(b) => Self::Bool(b),
            StoredValue::Integer(n) => Self::Integer(n),
            StoredValue::Float(f) => Self::Float(f),
            StoredValue::String(s) => Self::String(s),
            StoredValue::Json(text) => Self::Json(
                serde_json::from_str(&text)
                    .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?,
            ),
        })
    }
}

impl<H: TaskHandler, C: Clock> Interpreter<H, C> {
    /// Snapshot of the current variables and cursor.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.cursor().clone(), self.variables().clone())
    }

    /// Replace variables and cursor with the checkpoint's contents.
    pub fn restore_checkpoint(&mut self, checkpoint: Checkpoint) {
        debug!(
            current_state = %checkpoint.current_state,
            wait_until = checkpoint.wait_until,
            "Restoring checkpoint"
        );
        let (cursor, variables) = checkpoint.into_parts();
        self.replace_execution(cursor, variables);
    }

    /// Serialize variables and cursor as a JSON text blob.
    ///
    /// Fails if a float variable is NaN or infinite; the binary form keeps
    /// those.
    pub fn save_state(&self) -> Result<String, CheckpointError> {
        self.checkpoint().to_json()
    }

    /// Restore from a blob produced by [`save_state`](Self::save_state).
    ///
    /// All fields are replaced together, or none are.
    pub fn restore_state(&mut self, saved: &str) -> Result<(), CheckpointError> {
        let checkpoint = Checkpoint::from_json(saved).inspect_err(|err| {
            warn!(error = %err, "Failed to parse saved state");
        })?;
        self.restore_checkpoint(checkpoint);
        Ok(())
    }

    /// Serialize variables and cursor in the compact binary format.
    pub fn save_state_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        self.checkpoint().to_bytes()
    }

    /// Restore from bytes produced by
    /// [`save_state_binary`](Self::save_state_binary).
    pub fn restore_state_binary(&mut self, saved: &[u8]) -> Result<(), CheckpointError> {
        let checkpoint = Checkpoint::from_bytes(saved).inspect_err(|err| {
            warn!(error = %err, "Failed to decode saved state");
        })?;
        self.restore_checkpoint(checkpoint);
        Ok(())
    }
}
