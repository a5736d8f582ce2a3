//! Capability invoked by Task states.

use crate::core::Variables;

/// Performs the work behind a Task state.
///
/// The handler receives the state's `Resource` string and may read or write
/// any variable. It runs synchronously inside [`Interpreter::run`], so it
/// should return promptly; a slow handler stalls the host loop.
///
/// Any `FnMut(&str, &mut Variables)` closure is a handler.
///
/// # Example
///
/// ```rust
/// use stepline::core::Variables;
/// use stepline::engine::TaskHandler;
///
/// struct Thermometer {
///     reading: i64,
/// }
///
/// impl TaskHandler for Thermometer {
///     fn handle(&mut self, resource: &str, variables: &mut Variables) {
///         if resource == "read" {
///             let label = if self.reading > 30 { "hot" } else { "ok" };
///             variables.set("v", label);
///         }
///     }
/// }
///
/// let mut sensor = Thermometer { reading: 35 };
/// let mut vars = Variables::new();
/// sensor.handle("read", &mut vars);
/// assert_eq!(vars.text("v"), "hot");
/// ```
///
/// [`Interpreter::run`]: crate::engine::Interpreter::run
pub trait TaskHandler {
    fn handle(&mut self, resource: &str, variables: &mut Variables);
}

impl<F> TaskHandler for F
where
    F: FnMut(&str, &mut Variables),
{
    fn handle(&mut self, resource: &str, variables: &mut Variables) {
        self(resource, variables)
    }
}
