//! Sensor Loop
//!
//! This example drives a thermostat workflow from a polling loop, the way a
//! microcontroller `loop()` would, and simulates a deep sleep halfway through.
//!
//! Key concepts:
//! - One `run()` per loop iteration, never blocking inside the interpreter
//! - Sleeping for the recommended delay between polls
//! - Saving state before "deep sleep" and restoring it on wake-up
//! - Wall-clock deadlines, so a pending Wait survives the restart
//!
//! Run with: RUST_LOG=stepline=debug cargo run --example sensor_loop

use std::thread;
use std::time::Duration;
use stepline::validation::validate;
use stepline::{Definition, Interpreter, Status, TaskHandler, Variables, WallClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

const THERMOSTAT: &str = r#"{
    "StartAt": "Read",
    "States": {
        "Read": {"Type": "Task", "Resource": "read_temperature", "Next": "Check"},
        "Check": {"Type": "Choice", "Variable": "level",
                  "Choices": [{"StringEquals": "hot", "Next": "Cool"},
                              {"StringEquals": "cold", "Next": "Heat"}],
                  "Default": "Idle"},
        "Cool": {"Type": "Task", "Resource": "fan_on", "Next": "Settle"},
        "Heat": {"Type": "Task", "Resource": "heater_on", "Next": "Settle"},
        "Settle": {"Type": "Wait", "Millis": 300, "Next": "Read"},
        "Idle": {"Type": "Task", "Resource": "report"}
    }
}"#;

// Simulated sensor; each read cools the room a little.
struct Thermostat {
    temperature: i64,
}

impl TaskHandler for Thermostat {
    fn handle(&mut self, resource: &str, variables: &mut Variables) {
        match resource {
            "read_temperature" => {
                let level = match self.temperature {
                    t if t > 26 => "hot",
                    t if t < 18 => "cold",
                    _ => "ok",
                };
                variables.set("temperature", self.temperature);
                variables.set("level", level);
                info!(temperature = self.temperature, level, "Sensor read");
            }
            "fan_on" => self.temperature -= 3,
            "heater_on" => self.temperature += 3,
            "report" => info!(temperature = self.temperature, "Temperature settled"),
            other => info!(resource = other, "Unknown resource"),
        }
    }
}

fn poll(interpreter: &mut Interpreter<Thermostat, WallClock>, max_polls: usize) -> Status {
    let mut status = Status::NextStep;
    for _ in 0..max_polls {
        status = interpreter.run();
        match status {
            Status::WaitDelay => {
                thread::sleep(Duration::from_millis(interpreter.recommended_delay()));
            }
            Status::NextStep => {}
            Status::EndOfProcess | Status::InvalidState => break,
        }
    }
    status
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Sensor Loop Example ===\n");

    let definition: Definition = THERMOSTAT.parse().expect("definition parses");
    if let stillwater::validation::Validation::Failure(issues) = validate(&definition) {
        for issue in issues.iter() {
            println!("  lint: {issue}");
        }
    }

    let mut interpreter = Interpreter::with_clock(Thermostat { temperature: 33 }, WallClock);
    interpreter.load(definition);

    // Run a few steps, then "go to sleep".
    let status = poll(&mut interpreter, 4);
    let saved = interpreter.save_state().expect("state serializes");
    println!("Before sleep: {status}, at '{}'", interpreter.current_state());
    println!("Saved state: {saved}\n");

    // Wake up: a new interpreter, the same definition, the saved state.
    let mut resumed = Interpreter::with_clock(Thermostat { temperature: 30 }, WallClock);
    resumed.setup(THERMOSTAT).expect("definition parses");
    resumed.restore_state(&saved).expect("state restores");
    println!("Resumed at '{}'", resumed.current_state());

    let status = poll(&mut resumed, 100);
    println!("\nFinished with {status} at '{}'", resumed.current_state());
    println!("Final variables: {:?}", resumed.variables());

    println!("\n=== Example Complete ===");
}
