//! Property-based tests for the interpreter.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use serde_json::json;
use stepline::{Checkpoint, Interpreter, ManualClock, Status, Value, Variables};

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl stepline::TaskHandler for Recorder {
    fn handle(&mut self, resource: &str, _variables: &mut Variables) {
        self.calls.push(resource.to_string());
    }
}

fn interpreter(definition: &serde_json::Value, start: u64) -> Interpreter<Recorder, ManualClock> {
    let mut interpreter = Interpreter::with_clock(Recorder::default(), ManualClock::new(start));
    interpreter.setup(&definition.to_string()).unwrap();
    interpreter
}

prop_compose! {
    fn arbitrary_name()(name in "[A-Za-z][A-Za-z0-9_]{0,11}") -> String {
        name
    }
}

prop_compose! {
    fn arbitrary_value()(
        variant in 0..8u8,
        n in any::<i64>(),
        b in any::<bool>(),
        s in "[ -~]{0,16}",
        finite in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
        special in prop::sample::select(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]),
    ) -> Value {
        match variant {
            0 => Value::Null,
            1 => Value::Bool(b),
            2 => Value::Integer(n),
            3 => Value::String(s),
            4 => Value::Float(finite),
            5 => Value::Float(special),
            6 => Value::Json(if b { json!(s) } else { json!(n) }),
            _ => Value::Json(json!({"items": [n, s]})),
        }
    }
}

fn has_non_finite(checkpoint: &Checkpoint) -> bool {
    checkpoint
        .global_state
        .iter()
        .any(|(_, value)| matches!(value, Value::Float(f) if !f.is_finite()))
}

/// Field-by-field equality with floats compared by bit pattern, so NaN
/// matches itself.
fn same_checkpoint(a: &Checkpoint, b: &Checkpoint) -> bool {
    let same_values = a.global_state.len() == b.global_state.len()
        && a.global_state
            .iter()
            .zip(b.global_state.iter())
            .all(|((name_a, value_a), (name_b, value_b))| {
                name_a == name_b
                    && match (value_a, value_b) {
                        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
                        _ => value_a == value_b,
                    }
            });
    let cursor_only = |c: &Checkpoint| Checkpoint {
        global_state: Variables::new(),
        ..c.clone()
    };
    same_values && cursor_only(a) == cursor_only(b)
}

prop_compose! {
    fn arbitrary_checkpoint()(
        global_state in prop::collection::btree_map(arbitrary_name(), arbitrary_value(), 0..6),
        current_state in arbitrary_name(),
        wait_until in any::<u64>(),
        recommended_delay in any::<u64>(),
        finished in any::<bool>(),
    ) -> Checkpoint {
        Checkpoint {
            global_state: global_state.into_iter().collect(),
            current_state,
            wait_until,
            recommended_delay,
            finished,
        }
    }
}

proptest! {
    #[test]
    fn task_with_next_advances_once(resource in "[a-z]{1,12}", next in arbitrary_name()) {
        let definition = json!({
            "StartAt": "Start",
            "States": {
                "Start": {"Type": "Task", "Resource": resource, "Next": next}
            }
        });
        let mut interpreter = interpreter(&definition, 0);

        prop_assert_eq!(interpreter.run(), Status::NextStep);
        prop_assert_eq!(interpreter.current_state(), next.as_str());
        prop_assert_eq!(&interpreter.handler().calls, &vec![resource]);
    }

    #[test]
    fn terminal_task_runs_handler_exactly_once(resource in "[a-z]{1,12}", polls in 1..10usize) {
        let definition = json!({
            "StartAt": "Last",
            "States": {"Last": {"Type": "Task", "Resource": resource}}
        });
        let mut interpreter = interpreter(&definition, 0);

        for _ in 0..polls {
            prop_assert_eq!(interpreter.run(), Status::EndOfProcess);
        }
        prop_assert_eq!(interpreter.handler().calls.len(), 1);
    }

    #[test]
    fn choice_picks_first_matching_rule(
        literals in prop::collection::vec("[a-z]{1,4}", 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let choices: Vec<_> = literals
            .iter()
            .enumerate()
            .map(|(i, literal)| json!({"StringEquals": literal, "Next": format!("T{i}")}))
            .collect();
        let definition = json!({
            "StartAt": "Pick",
            "States": {
                "Pick": {"Type": "Choice", "Variable": "v", "Choices": choices, "Default": "Fallback"}
            }
        });
        let value = pick.get(&literals).clone();
        let expected = literals.iter().position(|l| *l == value).unwrap();

        let mut interpreter = interpreter(&definition, 0);
        interpreter.variables_mut().set("v", value);

        prop_assert_eq!(interpreter.run(), Status::NextStep);
        prop_assert_eq!(interpreter.current_state(), format!("T{expected}"));
    }

    #[test]
    fn choice_without_match_takes_default(
        literals in prop::collection::vec("[a-z]{1,4}", 0..6),
        value in "[A-Z]{1,4}",
    ) {
        let choices: Vec<_> = literals
            .iter()
            .map(|literal| json!({"StringEquals": literal, "Next": "Matched"}))
            .collect();
        let definition = json!({
            "StartAt": "Pick",
            "States": {
                "Pick": {"Type": "Choice", "Variable": "v", "Choices": choices, "Default": "Fallback"}
            }
        });

        let mut interpreter = interpreter(&definition, 0);
        interpreter.variables_mut().set("v", value);

        prop_assert_eq!(interpreter.run(), Status::NextStep);
        prop_assert_eq!(interpreter.current_state(), "Fallback");
    }

    #[test]
    fn wait_delay_is_bounded_by_duration(
        millis in 1..100_000u64,
        start in 0..1_000_000u64,
        elapsed_fraction in 0.0..1.0f64,
    ) {
        let definition = json!({
            "StartAt": "Pause",
            "States": {
                "Pause": {"Type": "Wait", "Millis": millis, "Next": "Done"},
                "Done": {"Type": "Succeed"}
            }
        });
        let mut interpreter = interpreter(&definition, start);

        prop_assert_eq!(interpreter.run(), Status::WaitDelay);
        prop_assert_eq!(interpreter.recommended_delay(), millis);

        let elapsed = ((millis as f64) * elapsed_fraction) as u64;
        interpreter.clock().advance(elapsed.min(millis - 1));
        prop_assert_eq!(interpreter.run(), Status::WaitDelay);
        let delay = interpreter.recommended_delay();
        prop_assert!(delay > 0 && delay <= millis);

        interpreter.clock().advance(delay);
        prop_assert_eq!(interpreter.run(), Status::EndOfProcess);
    }

    #[test]
    fn json_checkpoint_round_trip_is_exact(checkpoint in arbitrary_checkpoint()) {
        match checkpoint.to_json() {
            Ok(text) => {
                let restored = Checkpoint::from_json(&text).unwrap();
                prop_assert!(same_checkpoint(&restored, &checkpoint));
                for (name, value) in checkpoint.global_state.iter() {
                    prop_assert_eq!(restored.global_state.text(name), value.match_text());
                }
            }
            Err(_) => prop_assert!(has_non_finite(&checkpoint)),
        }
    }

    #[test]
    fn binary_checkpoint_round_trip_is_exact(checkpoint in arbitrary_checkpoint()) {
        let bytes = checkpoint.to_bytes().unwrap();
        prop_assert!(same_checkpoint(&Checkpoint::from_bytes(&bytes).unwrap(), &checkpoint));
    }

    #[test]
    fn restore_of_save_is_identity(checkpoint in arbitrary_checkpoint()) {
        let definition = json!({"StartAt": "S", "States": {"S": {"Type": "Succeed"}}});
        let mut source = interpreter(&definition, 0);
        source.restore_checkpoint(checkpoint.clone());

        let mut target = interpreter(&definition, 0);
        let before = target.checkpoint();
        match source.save_state() {
            Ok(saved) => {
                target.restore_state(&saved).unwrap();
                prop_assert!(same_checkpoint(&target.checkpoint(), &checkpoint));
            }
            Err(_) => {
                prop_assert!(has_non_finite(&checkpoint));
                prop_assert_eq!(target.checkpoint(), before);
            }
        }
    }

    #[test]
    fn garbage_never_restores(text in "[^{]{0,32}") {
        let definition = json!({"StartAt": "S", "States": {"S": {"Type": "Succeed"}}});
        let mut interpreter = interpreter(&definition, 0);
        let before = interpreter.checkpoint();

        prop_assert!(interpreter.restore_state(&text).is_err());
        prop_assert_eq!(interpreter.checkpoint(), before);
    }
}
