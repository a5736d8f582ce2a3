//! Status codes reported by a single interpreter step.

use std::fmt;

/// Outcome of one call to [`Interpreter::run`](crate::engine::Interpreter::run).
///
/// The numeric codes are part of the public contract and stay stable across
/// releases, so hosts that only deal in integers can keep comparing against
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// The cursor names a state that is missing, malformed, or of an
    /// unsupported type, or no definition has been loaded.
    InvalidState = -2,

    /// The workflow has finished.
    EndOfProcess = -1,

    /// A transition happened; call `run` again to continue.
    NextStep = 1,

    /// A Wait state is pending. See
    /// [`Interpreter::recommended_delay`](crate::engine::Interpreter::recommended_delay).
    WaitDelay = 2,
}

impl Status {
    /// Numeric code of this status.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Map a numeric code back to a status.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stepline::core::Status;
    ///
    /// assert_eq!(Status::from_code(2), Some(Status::WaitDelay));
    /// assert_eq!(Status::from_code(0), None);
    /// ```
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -2 => Some(Self::InvalidState),
            -1 => Some(Self::EndOfProcess),
            1 => Some(Self::NextStep),
            2 => Some(Self::WaitDelay),
            _ => None,
        }
    }

    /// Whether the caller should stop polling.
    ///
    /// `InvalidState` counts as terminal here; callers that want to recover
    /// (e.g. via [`Interpreter::reset`](crate::engine::Interpreter::reset))
    /// must do so explicitly.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::InvalidState | Self::EndOfProcess)
    }

    fn label(self) -> &'static str {
        match self {
            Self::InvalidState => "INVALID_STATE",
            Self::EndOfProcess => "END_OF_PROCESS",
            Self::NextStep => "NEXT_STEP",
            Self::WaitDelay => "WAIT_DELAY",
        }
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.label(), self.code())
    }
}
