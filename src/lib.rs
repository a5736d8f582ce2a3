//! Stepline: a non-blocking interpreter for a small Amazon States Language subset
//!
//! Stepline runs a workflow described in JSON (Task, Choice, Wait and
//! Succeed states) one step per call, so it fits cooperative `loop()`-style
//! hosts on constrained devices: no threads, no sleeping, no blocking. The
//! interpreter's position and variables can be saved and restored, letting
//! a workflow continue after a reboot or deep sleep.
//!
//! # Core Concepts
//!
//! - **Definition**: the parsed, immutable workflow (`StartAt` + `States`)
//! - **Cursor**: the current state, the pending Wait deadline, and the last
//!   recommended delay
//! - **Variables**: values written by task handlers and read by Choice states
//! - **Interpreter**: performs one transition per [`Interpreter::run`] and
//!   reports a [`Status`]
//! - **Checkpoint**: the cursor plus variables, as JSON text or compact bytes
//!
//! # Example
//!
//! ```rust
//! use stepline::{Interpreter, ManualClock, Status, Variables};
//!
//! const DEFINITION: &str = r#"{
//!     "StartAt": "A",
//!     "States": {
//!         "A": {"Type": "Task", "Resource": "read", "Next": "B"},
//!         "B": {"Type": "Choice", "Variable": "v",
//!               "Choices": [{"StringEquals": "hot", "Next": "C"}],
//!               "Default": "D"},
//!         "C": {"Type": "Wait", "Seconds": 5, "Next": "E"},
//!         "D": {"Type": "Task", "Resource": "log"},
//!         "E": {"Type": "Task", "Resource": "cool"}
//!     }
//! }"#;
//!
//! let clock = ManualClock::new(0);
//! let mut interpreter = Interpreter::with_clock(
//!     |resource: &str, vars: &mut Variables| {
//!         if resource == "read" {
//!             vars.set("v", "hot");
//!         }
//!     },
//!     clock.clone(),
//! );
//!
//! interpreter.setup(DEFINITION).unwrap();
//!
//! assert_eq!(interpreter.run(), Status::NextStep);
//! assert_eq!(interpreter.run(), Status::NextStep);
//! assert_eq!(interpreter.run(), Status::WaitDelay);
//! assert_eq!(interpreter.recommended_delay(), 5_000);
//!
//! // Persist across a restart: same definition, then restore.
//! let saved = interpreter.save_state().unwrap();
//! clock.advance(5_000);
//!
//! let mut resumed = Interpreter::with_clock(
//!     |_: &str, _: &mut Variables| {},
//!     clock.clone(),
//! );
//! resumed.setup(DEFINITION).unwrap();
//! resumed.restore_state(&saved).unwrap();
//!
//! assert_eq!(resumed.current_state(), "E");
//! assert_eq!(resumed.run(), Status::EndOfProcess);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, InterpreterBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use self::core::{Definition, DefinitionError, StateDescriptor, Status, Value, Variables};
pub use engine::{
    Clock, Interpreter, InterpreterConfig, ManualClock, MonotonicClock, TaskHandler, WaitPolicy,
    WallClock,
};
