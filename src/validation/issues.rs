//! Problems a definition lint can report.

use thiserror::Error;

/// A structural problem in a definition.
///
/// None of these stop a definition from loading; each one would surface as
/// `INVALID_STATE` (or as dead weight) only once execution gets there.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DefinitionIssue {
    #[error("StartAt names missing state '{start_at}'")]
    MissingStartState { start_at: String },

    #[error("State '{state}' transitions to missing state '{target}'")]
    DanglingTarget { state: String, target: String },

    #[error("Choice state '{state}' has no Default")]
    MissingDefault { state: String },

    #[error("Wait state '{state}' has no Next")]
    MissingNext { state: String },

    #[error("State '{state}' has unsupported type '{type_name}'")]
    UnsupportedType { state: String, type_name: String },

    #[error("State '{state}' is unreachable from StartAt")]
    Unreachable { state: String },
}
