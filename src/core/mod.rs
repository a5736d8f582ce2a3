//! Definition store, execution cursor, and variable store.
//!
//! Everything in this module is plain data: the definition is immutable
//! once parsed, and the cursor and variables are only changed by the
//! [`engine`](crate::engine) and [`checkpoint`](crate::checkpoint) modules.

mod cursor;
mod definition;
mod error;
mod state;
mod status;
mod variables;

pub use cursor::Cursor;
pub use definition::Definition;
pub use error::DefinitionError;
pub use state::{ChoiceRule, StateDescriptor};
pub use status::Status;
pub use variables::{Value, Variables};
