//! The interpreter object and its non-blocking step function.

use super::clock::{Clock, MonotonicClock};
use super::config::{InterpreterConfig, WaitPolicy};
use super::handler::TaskHandler;
use crate::core::{Cursor, Definition, DefinitionError, StateDescriptor, Status, Variables};
use tracing::{debug, info, warn};

/// Interpreter for a loaded workflow definition.
///
/// Each [`run`](Self::run) call performs at most one transition and returns
/// immediately. The interpreter holds plain mutable state without locking:
/// it belongs to a single polling loop and is driven from there only.
///
/// # Example
///
/// ```rust
/// use stepline::core::{Status, Variables};
/// use stepline::engine::Interpreter;
///
/// let mut interpreter = Interpreter::new(|resource: &str, vars: &mut Variables| {
///     if resource == "read" {
///         vars.set("v", "hot");
///     }
/// });
///
/// interpreter.setup(r#"{
///     "StartAt": "Read",
///     "States": {
///         "Read": {"Type": "Task", "Resource": "read", "Next": "Check"},
///         "Check": {"Type": "Choice", "Variable": "v",
///                   "Choices": [{"StringEquals": "hot", "Next": "Cool"}],
///                   "Default": "Idle"},
///         "Cool": {"Type": "Task", "Resource": "fan"},
///         "Idle": {"Type": "Succeed"}
///     }
/// }"#).unwrap();
///
/// assert_eq!(interpreter.run(), Status::NextStep);
/// assert_eq!(interpreter.run(), Status::NextStep);
/// assert_eq!(interpreter.current_state(), "Cool");
/// assert_eq!(interpreter.run(), Status::EndOfProcess);
/// ```
pub struct Interpreter<H, C = MonotonicClock> {
    definition: Option<Definition>,
    cursor: Cursor,
    variables: Variables,
    handler: H,
    clock: C,
    config: InterpreterConfig,
}

impl<H: TaskHandler> Interpreter<H, MonotonicClock> {
    /// Create an interpreter with no definition loaded, timed by a
    /// [`MonotonicClock`].
    pub fn new(handler: H) -> Self {
        Self::with_clock(handler, MonotonicClock::new())
    }
}

impl<H: TaskHandler, C: Clock> Interpreter<H, C> {
    pub fn with_clock(handler: H, clock: C) -> Self {
        Self {
            definition: None,
            cursor: Cursor::default(),
            variables: Variables::new(),
            handler,
            clock,
            config: InterpreterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Load a definition from JSON and move the cursor to its `StartAt`.
    ///
    /// On failure nothing changes: the previous definition, cursor and
    /// variables stay as they were. Variables are kept on success too.
    pub fn setup(&mut self, source: &str) -> Result<(), DefinitionError> {
        let definition = Definition::from_json(source).inspect_err(|err| {
            warn!(error = %err, "Rejected state machine definition");
        })?;
        self.load(definition);
        Ok(())
    }

    /// Install an already parsed definition; same cursor effects as
    /// [`setup`](Self::setup).
    pub fn load(&mut self, definition: Definition) {
        debug!(
            start_at = definition.start_at(),
            states = definition.len(),
            "Loaded state machine definition"
        );
        self.cursor.current_state = definition.start_at().to_string();
        self.cursor.wait_until = 0;
        self.cursor.finished = false;
        self.definition = Some(definition);
    }

    /// Perform at most one transition.
    ///
    /// Never blocks. While a Wait deadline is pending this only refreshes
    /// [`recommended_delay`](Self::recommended_delay) and returns
    /// [`Status::WaitDelay`]. Once the workflow has ended every further call
    /// returns [`Status::EndOfProcess`] without running any handler.
    pub fn run(&mut self) -> Status {
        if self.cursor.finished {
            return Status::EndOfProcess;
        }

        let now = self.clock.now_millis();
        if self.cursor.is_waiting(now) {
            self.cursor.recommended_delay = self.cursor.remaining(now);
            debug!(
                next = %self.cursor.current_state,
                remaining_ms = self.cursor.recommended_delay,
                "Waiting"
            );
            return Status::WaitDelay;
        }

        let Some(definition) = self.definition.as_ref() else {
            warn!("No state machine definition loaded");
            return Status::InvalidState;
        };

        let Some(state) = definition.state(&self.cursor.current_state) else {
            warn!(state = %self.cursor.current_state, "Unknown state");
            return Status::InvalidState;
        };

        debug!(
            state = %self.cursor.current_state,
            state_type = state.type_name(),
            "Processing state"
        );

        match state {
            StateDescriptor::Task { resource, next } => {
                debug!(resource = %resource, "Executing task");
                self.handler.handle(resource, &mut self.variables);

                match next {
                    Some(next) => {
                        self.cursor.current_state = next.clone();
                        debug!(next = %next, "Transitioning");
                        Status::NextStep
                    }
                    None => {
                        self.cursor.finished = true;
                        info!(state = %self.cursor.current_state, "End of process");
                        Status::EndOfProcess
                    }
                }
            }

            StateDescriptor::Choice {
                variable,
                choices,
                default,
            } => {
                let value = self.variables.text(variable);
                let target = choices
                    .iter()
                    .find(|rule| rule.matches(&value))
                    .map(|rule| &rule.next)
                    .or(default.as_ref());

                match target {
                    Some(target) => {
                        debug!(
                            variable = %variable,
                            value = %value,
                            next = %target,
                            "Choice resolved"
                        );
                        self.cursor.current_state = target.clone();
                        Status::NextStep
                    }
                    None => {
                        warn!(
                            state = %self.cursor.current_state,
                            variable = %variable,
                            value = %value,
                            "No choice matched and no Default declared"
                        );
                        Status::InvalidState
                    }
                }
            }

            StateDescriptor::Wait { duration, next } => {
                let Some(next) = next else {
                    warn!(state = %self.cursor.current_state, "Wait state has no Next");
                    return Status::InvalidState;
                };

                let delay = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
                self.cursor.wait_until = now.saturating_add(delay);
                self.cursor.current_state = next.clone();
                debug!(delay_ms = delay, next = %next, "Wait armed");

                match self.config.wait_policy {
                    WaitPolicy::Report if delay > 0 => {
                        self.cursor.recommended_delay = delay;
                        Status::WaitDelay
                    }
                    _ => Status::NextStep,
                }
            }

            StateDescriptor::Succeed => {
                self.cursor.finished = true;
                info!(state = %self.cursor.current_state, "End of process");
                Status::EndOfProcess
            }

            StateDescriptor::Unsupported { type_name } => {
                warn!(
                    state = %self.cursor.current_state,
                    state_type = %type_name,
                    "Unsupported state type"
                );
                Status::InvalidState
            }
        }
    }

    /// Sleep hint computed by the last `WAIT_DELAY` result.
    ///
    /// Advisory only: calling [`run`](Self::run) earlier is always safe.
    pub fn recommended_delay(&self) -> u64 {
        self.cursor.recommended_delay
    }

    /// Move back to `StartAt`, dropping any pending wait and the end latch.
    /// Variables are kept. Does nothing without a definition.
    pub fn reset(&mut self) {
        if let Some(definition) = &self.definition {
            debug!(start_at = definition.start_at(), "Resetting cursor");
            self.cursor = Cursor::at(definition.start_at());
        }
    }

    /// Name of the state the next `run` will execute.
    pub fn current_state(&self) -> &str {
        &self.cursor.current_state
    }

    /// Clock reading the last armed Wait expires at; 0 if none was armed.
    pub fn wait_until(&self) -> u64 {
        self.cursor.wait_until
    }

    /// Whether the workflow has ended and `run` is latched.
    pub fn is_finished(&self) -> bool {
        self.cursor.finished
    }

    /// Execution position and delay bookkeeping.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The loaded definition, if `setup` has succeeded.
    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    /// Variables written by task handlers.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Seed or inspect variables from outside a task.
    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    /// The task handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the task handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// The time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Engine policy settings.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Replace cursor and variables in one step.
    pub(crate) fn replace_execution(&mut self, cursor: Cursor, variables: Variables) {
        self.cursor = cursor;
        self.variables = variables;
    }
}
