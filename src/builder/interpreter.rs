//! Builder for constructing interpreters.

use crate::builder::error::BuildError;
use crate::core::Definition;
use crate::engine::{Clock, Interpreter, InterpreterConfig, MonotonicClock, TaskHandler, WaitPolicy};

enum Source {
    Json(String),
    Parsed(Definition),
}

/// Builder for constructing interpreters with a fluent API.
///
/// # Example
///
/// ```rust
/// use stepline::builder::InterpreterBuilder;
/// use stepline::core::{Status, Variables};
/// use stepline::engine::{ManualClock, WaitPolicy};
///
/// let mut interpreter = InterpreterBuilder::new()
///     .handler(|_: &str, _: &mut Variables| {})
///     .clock(ManualClock::new(0))
///     .wait_policy(WaitPolicy::FallThrough)
///     .definition(r#"{"StartAt": "Done", "States": {"Done": {"Type": "Succeed"}}}"#)
///     .build()
///     .unwrap();
///
/// assert_eq!(interpreter.run(), Status::EndOfProcess);
/// ```
pub struct InterpreterBuilder<H, C = MonotonicClock> {
    handler: Option<H>,
    clock: C,
    config: InterpreterConfig,
    source: Option<Source>,
}

impl<H: TaskHandler> InterpreterBuilder<H, MonotonicClock> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            handler: None,
            clock: MonotonicClock::new(),
            config: InterpreterConfig::default(),
            source: None,
        }
    }
}

impl<H: TaskHandler> Default for InterpreterBuilder<H, MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TaskHandler, C: Clock> InterpreterBuilder<H, C> {
    /// Set the task handler (required).
    pub fn handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Replace the time source.
    pub fn clock<C2: Clock>(self, clock: C2) -> InterpreterBuilder<H, C2> {
        InterpreterBuilder {
            handler: self.handler,
            clock,
            config: self.config,
            source: self.source,
        }
    }

    pub fn config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn wait_policy(mut self, policy: WaitPolicy) -> Self {
        self.config.wait_policy = policy;
        self
    }

    /// Definition JSON to load at build time. Optional; without one the
    /// interpreter starts empty and reports `INVALID_STATE` until
    /// [`Interpreter::setup`] succeeds.
    pub fn definition(mut self, source: impl Into<String>) -> Self {
        self.source = Some(Source::Json(source.into()));
        self
    }

    /// Already parsed definition to load at build time.
    pub fn parsed_definition(mut self, definition: Definition) -> Self {
        self.source = Some(Source::Parsed(definition));
        self
    }

    /// Build the interpreter.
    /// Returns an error if the handler is missing or the definition does
    /// not parse.
    pub fn build(self) -> Result<Interpreter<H, C>, BuildError> {
        let handler = self.handler.ok_or(BuildError::MissingHandler)?;
        let mut interpreter = Interpreter::with_clock(handler, self.clock).with_config(self.config);

        match self.source {
            Some(Source::Json(text)) => interpreter.setup(&text)?,
            Some(Source::Parsed(definition)) => interpreter.load(definition),
            None => {}
        }

        Ok(interpreter)
    }
}
