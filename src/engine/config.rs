//! Interpreter policy configuration.

use serde::{Deserialize, Serialize};

/// What `run` reports on the call that enters a Wait state.
///
/// Both policies commit the Wait's `Next` state and arm the deadline on that
/// call; they differ only in the status returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitPolicy {
    /// Return `WAIT_DELAY` straight away, with the full duration as the
    /// recommended delay. A zero-length wait returns `NEXT_STEP`.
    #[default]
    Report,

    /// Return `NEXT_STEP`; the following call reports `WAIT_DELAY`.
    FallThrough,
}

/// Engine configuration.
///
/// # Example
///
/// ```rust
/// use stepline::engine::{InterpreterConfig, WaitPolicy};
///
/// let config: InterpreterConfig =
///     serde_json::from_str(r#"{"wait_policy": "fall_through"}"#).unwrap();
/// assert_eq!(config.wait_policy, WaitPolicy::FallThrough);
///
/// let defaults: InterpreterConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(defaults, InterpreterConfig::default());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    pub wait_policy: WaitPolicy,
}

impl InterpreterConfig {
    pub fn with_wait_policy(mut self, policy: WaitPolicy) -> Self {
        self.wait_policy = policy;
        self
    }
}
