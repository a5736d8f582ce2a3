//! Macros for ergonomic variable store construction.

/// Build a [`Variables`](crate::core::Variables) store from
/// `name => value` pairs.
///
/// # Example
///
/// ```
/// use stepline::variables;
///
/// let vars = variables! {
///     "v" => "hot",
///     "reading" => 31,
///     "armed" => true,
/// };
///
/// assert_eq!(vars.text("v"), "hot");
/// assert_eq!(vars.text("reading"), "31");
/// assert_eq!(vars.len(), 3);
/// ```
#[macro_export]
macro_rules! variables {
    () => {
        $crate::core::Variables::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut vars = $crate::core::Variables::new();
        $(
            vars.set($name, $value);
        )+
        vars
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::Value;

    #[test]
    fn variables_macro_builds_store() {
        let vars = variables! {
            "s" => "text",
            "n" => 7,
        };

        assert_eq!(vars.get("s"), Some(&Value::from("text")));
        assert_eq!(vars.get("n"), Some(&Value::Integer(7)));
    }

    #[test]
    fn variables_macro_supports_empty_store() {
        let vars = variables!();
        assert!(vars.is_empty());
    }

    #[test]
    fn later_entries_overwrite_earlier_ones() {
        let vars = variables! {
            "v" => "cold",
            "v" => "hot",
        };

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.text("v"), "hot");
    }
}
