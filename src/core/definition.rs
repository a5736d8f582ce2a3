//! Immutable workflow definition: the start state plus every named state.

use super::error::DefinitionError;
use super::state::{RawState, StateDescriptor};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDefinition {
    start_at: String,
    states: HashMap<String, RawState>,
}

/// Parsed workflow definition.
///
/// Target names are not checked against `states` here; a dangling reference
/// only surfaces when the interpreter reaches it. Use
/// [`validation::validate`](crate::validation::validate) for an eager check.
///
/// # Example
///
/// ```rust
/// use stepline::core::Definition;
///
/// let definition = Definition::from_json(r#"{
///     "StartAt": "Read",
///     "States": {
///         "Read": {"Type": "Task", "Resource": "sensor"}
///     }
/// }"#).unwrap();
///
/// assert_eq!(definition.start_at(), "Read");
/// assert_eq!(definition.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    start_at: String,
    states: HashMap<String, StateDescriptor>,
}

impl Definition {
    /// Parse a definition from its JSON source text.
    pub fn from_json(source: &str) -> Result<Self, DefinitionError> {
        let raw: RawDefinition = serde_json::from_str(source)?;
        Ok(Self {
            start_at: raw.start_at,
            states: raw
                .states
                .into_iter()
                .map(|(name, state)| (name, state.into_descriptor()))
                .collect(),
        })
    }

    /// Build a definition directly from descriptors.
    pub fn new<I, N>(start_at: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = (N, StateDescriptor)>,
        N: Into<String>,
    {
        Self {
            start_at: start_at.into(),
            states: states
                .into_iter()
                .map(|(name, state)| (name.into(), state))
                .collect(),
        }
    }

    pub fn start_at(&self) -> &str {
        &self.start_at
    }

    pub fn state(&self, name: &str) -> Option<&StateDescriptor> {
        self.states.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// State names in sorted order.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl FromStr for Definition {
    type Err = DefinitionError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::from_json(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChoiceRule;
    use std::time::Duration;

    const SAMPLE: &str = r#"{
        "StartAt": "A",
        "States": {
            "A": {"Type": "Task", "Resource": "read", "Next": "B"},
            "B": {"Type": "Choice", "Variable": "v",
                  "Choices": [{"StringEquals": "hot", "Next": "C"}],
                  "Default": "D"},
            "C": {"Type": "Wait", "Seconds": 5, "Next": "E"},
            "D": {"Type": "Task", "Resource": "log"},
            "E": {"Type": "Task", "Resource": "cool"}
        }
    }"#;

    #[test]
    fn parses_every_state_type() {
        let definition = Definition::from_json(SAMPLE).unwrap();

        assert_eq!(definition.start_at(), "A");
        assert_eq!(definition.state_names(), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(
            definition.state("A"),
            Some(&StateDescriptor::Task {
                resource: "read".to_string(),
                next: Some("B".to_string()),
            })
        );
        assert_eq!(
            definition.state("B"),
            Some(&StateDescriptor::Choice {
                variable: "v".to_string(),
                choices: vec![ChoiceRule::new("hot", "C")],
                default: Some("D".to_string()),
            })
        );
        assert_eq!(
            definition.state("C"),
            Some(&StateDescriptor::Wait {
                duration: Duration::from_secs(5),
                next: Some("E".to_string()),
            })
        );
    }

    #[test]
    fn dangling_targets_still_load() {
        let definition = Definition::from_json(
            r#"{"StartAt": "Missing", "States": {"A": {"Type": "Task", "Next": "Nowhere"}}}"#,
        )
        .unwrap();

        assert!(!definition.contains("Missing"));
        assert!(definition.contains("A"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = Definition::from_json("{\"StartAt\": ");
        assert!(matches!(result, Err(DefinitionError::Parse(_))));
    }

    #[test]
    fn start_at_and_states_are_required() {
        assert!(Definition::from_json(r#"{"States": {}}"#).is_err());
        assert!(Definition::from_json(r#"{"StartAt": "A"}"#).is_err());
    }

    #[test]
    fn from_str_matches_from_json() {
        let parsed: Definition = SAMPLE.parse().unwrap();
        assert_eq!(parsed, Definition::from_json(SAMPLE).unwrap());
    }

    #[test]
    fn builds_from_descriptors() {
        let definition = Definition::new("Only", [("Only", StateDescriptor::Succeed)]);
        assert_eq!(definition.start_at(), "Only");
        assert_eq!(definition.state("Only"), Some(&StateDescriptor::Succeed));
        assert!(!definition.is_empty());
    }
}
