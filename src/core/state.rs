//! State descriptors: one named node of a workflow definition.

use serde::Deserialize;
use std::time::Duration;

/// One `{StringEquals, Next}` branch of a Choice state.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoiceRule {
    /// Literal compared against the variable's text, case-sensitively.
    pub string_equals: String,
    /// Target state when this rule matches.
    pub next: String,
}

impl ChoiceRule {
    pub fn new(string_equals: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            string_equals: string_equals.into(),
            next: next.into(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.string_equals == text
    }
}

/// Behavior of a single state, resolved from its JSON form.
///
/// Structural problems that only matter once the state is reached (unknown
/// `Type`, missing `Default`, a Wait without `Next`) are kept as data here
/// and reported by the engine as `INVALID_STATE`, so a definition with an
/// unused broken branch still loads.
#[derive(Clone, Debug, PartialEq)]
pub enum StateDescriptor {
    /// Hands `resource` to the task handler, then moves to `next` or ends.
    Task {
        resource: String,
        next: Option<String>,
    },

    /// First-match branch on the text of `variable`.
    Choice {
        variable: String,
        choices: Vec<ChoiceRule>,
        default: Option<String>,
    },

    /// Arms a deadline `duration` from now and commits `next`.
    Wait {
        duration: Duration,
        next: Option<String>,
    },

    /// Explicit terminal state.
    Succeed,

    /// Any `Type` the interpreter does not implement, including a missing one.
    Unsupported { type_name: String },
}

impl StateDescriptor {
    /// The `Type` string this descriptor was declared with.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Task { .. } => "Task",
            Self::Choice { .. } => "Choice",
            Self::Wait { .. } => "Wait",
            Self::Succeed => "Succeed",
            Self::Unsupported { type_name } => type_name,
        }
    }

    /// Whether reaching this state ends the workflow.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Succeed | Self::Task { next: None, .. })
    }

    /// Every state name this descriptor can transition to, in declaration
    /// order.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Task { next, .. } | Self::Wait { next, .. } => {
                next.iter().map(String::as_str).collect()
            }
            Self::Choice {
                choices, default, ..
            } => choices
                .iter()
                .map(|rule| rule.next.as_str())
                .chain(default.as_deref())
                .collect(),
            Self::Succeed | Self::Unsupported { .. } => Vec::new(),
        }
    }
}

/// JSON shape of a state; every field is optional so that per-type
/// requirements are enforced at run time.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct RawState {
    #[serde(rename = "Type")]
    state_type: Option<String>,
    resource: Option<String>,
    next: Option<String>,
    choices: Vec<ChoiceRule>,
    variable: Option<String>,
    default: Option<String>,
    seconds: Option<u64>,
    millis: Option<u64>,
}

impl RawState {
    pub(crate) fn into_descriptor(self) -> StateDescriptor {
        match self.state_type.as_deref() {
            Some("Task") => StateDescriptor::Task {
                resource: self.resource.unwrap_or_default(),
                next: self.next,
            },
            Some("Choice") => StateDescriptor::Choice {
                variable: self.variable.unwrap_or_default(),
                choices: self.choices,
                default: self.default,
            },
            // Millis is the finer-grained field and wins when both are set.
            Some("Wait") => StateDescriptor::Wait {
                duration: match (self.millis, self.seconds) {
                    (Some(ms), _) => Duration::from_millis(ms),
                    (None, Some(secs)) => Duration::from_secs(secs),
                    (None, None) => Duration::ZERO,
                },
                next: self.next,
            },
            Some("Succeed") => StateDescriptor::Succeed,
            other => StateDescriptor::Unsupported {
                type_name: other.unwrap_or_default().to_string(),
            },
        }
    }
}
