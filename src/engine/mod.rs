//! Transition engine: the interpreter and its collaborators.
//!
//! # Key Concepts
//!
//! - **Interpreter**: owns the definition, cursor and variables, and steps
//!   through states one `run` call at a time
//! - **TaskHandler**: the capability that does the work behind Task states
//! - **Clock**: where "now" comes from when arming and checking Wait deadlines
//! - **InterpreterConfig**: policy knobs, currently the Wait entry policy

mod clock;
mod config;
mod handler;
mod interpreter;

pub use clock::{Clock, ManualClock, MonotonicClock, WallClock};
pub use config::{InterpreterConfig, WaitPolicy};
pub use handler::TaskHandler;
pub use interpreter::Interpreter;
