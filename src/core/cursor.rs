//! Execution cursor: where the interpreter is and when it may move on.

/// Mutable interpreter position plus delay bookkeeping.
///
/// Times are in [`Clock`](crate::engine::Clock) units (milliseconds). A
/// `wait_until` of zero, or any value not after the current clock reading,
/// means nothing is pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub current_state: String,
    pub wait_until: u64,
    pub recommended_delay: u64,
    /// Latched once the workflow has reached a terminal state.
    pub finished: bool,
}

impl Cursor {
    /// A cursor positioned at `state` with no pending wait.
    pub fn at(state: impl Into<String>) -> Self {
        Self {
            current_state: state.into(),
            ..Self::default()
        }
    }

    /// Whether a deadline lies after `now`.
    pub fn is_waiting(&self, now: u64) -> bool {
        now < self.wait_until
    }

    /// Time left until the deadline, floored at zero.
    pub fn remaining(&self, now: u64) -> u64 {
        self.wait_until.saturating_sub(now)
    }
}
