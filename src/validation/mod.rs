//! Optional eager checks for workflow definitions.
//!
//! Loading a definition never validates it; references are resolved lazily
//! as the interpreter reaches them. This module lets a caller lint a
//! definition up front and get every problem at once, using stillwater's
//! `Validation` to accumulate findings instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use stepline::core::Definition;
//! use stepline::validation::{validate, DefinitionIssue};
//! use stillwater::validation::Validation;
//!
//! let definition = Definition::from_json(r#"{
//!     "StartAt": "Check",
//!     "States": {
//!         "Check": {"Type": "Choice", "Variable": "v",
//!                   "Choices": [{"StringEquals": "hot", "Next": "Cool"}]}
//!     }
//! }"#).unwrap();
//!
//! match validate(&definition) {
//!     Validation::Failure(issues) => assert_eq!(issues.len(), 2),
//!     Validation::Success(_) => panic!("expected issues"),
//! }
//! ```

mod issues;

pub use issues::DefinitionIssue;

use crate::core::{Definition, StateDescriptor};
use std::collections::{BTreeSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionIssue>>;

fn check(issue: Option<DefinitionIssue>) -> Check {
    match issue {
        Some(issue) => Validation::fail(issue),
        None => Validation::success(()),
    }
}

/// Lint `definition`, accumulating every issue found.
///
/// States are visited in sorted name order so results are stable.
pub fn validate(definition: &Definition) -> Validation<(), NonEmptyVec<DefinitionIssue>> {
    let mut checks: Vec<Check> = Vec::new();

    let start_at = definition.start_at();
    checks.push(check((!definition.contains(start_at)).then(|| {
        DefinitionIssue::MissingStartState {
            start_at: start_at.to_string(),
        }
    })));

    for name in definition.state_names() {
        let Some(state) = definition.state(name) else {
            continue;
        };

        match state {
            StateDescriptor::Choice { default: None, .. } => {
                checks.push(check(Some(DefinitionIssue::MissingDefault {
                    state: name.to_string(),
                })));
            }
            StateDescriptor::Wait { next: None, .. } => {
                checks.push(check(Some(DefinitionIssue::MissingNext {
                    state: name.to_string(),
                })));
            }
            StateDescriptor::Unsupported { type_name } => {
                checks.push(check(Some(DefinitionIssue::UnsupportedType {
                    state: name.to_string(),
                    type_name: type_name.clone(),
                })));
            }
            _ => {}
        }

        for target in state.targets() {
            checks.push(check((!definition.contains(target)).then(|| {
                DefinitionIssue::DanglingTarget {
                    state: name.to_string(),
                    target: target.to_string(),
                }
            })));
        }
    }

    let reachable = reachable_states(definition);
    for name in definition.state_names() {
        checks.push(check((!reachable.contains(name)).then(|| {
            DefinitionIssue::Unreachable {
                state: name.to_string(),
            }
        })));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Names reachable from `StartAt` by following declared transitions.
pub fn reachable_states(definition: &Definition) -> BTreeSet<&str> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([definition.start_at()]);

    while let Some(name) = queue.pop_front() {
        let Some(state) = definition.state(name) else {
            continue;
        };
        if !seen.insert(name) {
            continue;
        }
        queue.extend(state.targets());
    }

    seen
}
