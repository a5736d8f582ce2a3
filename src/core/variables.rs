//! Variable store shared between task handlers and Choice states.
//!
//! The interpreter never initializes or validates entries. Handlers write
//! whatever they like; Choice states only ever compare the textual form of a
//! value against a literal.

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A single variable value.
///
/// Serialized as the bare JSON value, so a persisted store is a plain object
/// such as `{"v": "hot", "count": 3, "armed": true}`. Arrays, objects and
/// integers outside the `i64` range are kept verbatim in [`Value::Json`].
///
/// Non-finite floats have no JSON form and fail to serialize.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Json(serde_json::Value),
}

impl Value {
    /// Text used when a Choice state compares this value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stepline::core::Value;
    ///
    /// assert_eq!(Value::from("hot").match_text(), "hot");
    /// assert_eq!(Value::from(42).match_text(), "42");
    /// assert_eq!(Value::from(true).match_text(), "true");
    /// assert_eq!(Value::Null.match_text(), "");
    /// ```
    pub fn match_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Integer(n) => Cow::Owned(n.to_string()),
            Self::Float(f) => Cow::Owned(f.to_string()),
            Self::String(s) => Cow::Borrowed(s.as_str()),
            Self::Json(json) => Cow::Owned(json.to_string()),
        }
    }

    /// Fold a scalar held in [`Value::Json`] onto its dedicated variant, so
    /// the value reads back from JSON exactly as stored.
    pub fn canonical(self) -> Self {
        match self {
            Self::Json(json) => Self::from(json),
            other => other,
        }
    }

    /// The string payload, if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is a [`Value::Integer`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of an integer or float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The boolean payload, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Self::Float(f) => Err(S::Error::custom(format!(
                "non-finite number {f} has no JSON representation"
            ))),
            Self::String(s) => serializer.serialize_str(s),
            Self::Json(json) => json.serialize(serializer),
        }
    }
}

/// Decoded through [`serde_json::Value`] so that every JSON number lands in
/// the same variant [`From<serde_json::Value>`] would pick.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Scalars map onto their dedicated variants; arrays, objects and integers
/// outside the `i64` range stay as raw JSON.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Self::Integer(i),
                (None, Some(f)) if n.is_f64() => Self::Float(f),
                _ => Self::Json(serde_json::Value::Number(n)),
            },
            other => Self::Json(other),
        }
    }
}

/// Mapping from variable name to [`Value`].
///
/// Keys are kept ordered so a saved store serializes deterministically.
/// Values are stored in [canonical](Value::canonical) form.
///
/// # Example
///
/// ```rust
/// use stepline::core::Variables;
///
/// let mut vars = Variables::new();
/// vars.set("v", "hot");
/// vars.set("reading", 31);
///
/// assert_eq!(vars.text("v"), "hot");
/// assert_eq!(vars.text("reading"), "31");
/// assert_eq!(vars.text("missing"), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    entries: BTreeMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Insert or replace a variable, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let value: Value = value.into();
        self.entries.insert(name.into(), value.canonical())
    }

    /// Remove a variable, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Whether `name` is set, even to [`Value::Null`].
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Comparison text for `name`; absent variables read as the empty string.
    pub fn text(&self, name: &str) -> Cow<'_, str> {
        self.entries
            .get(name)
            .map_or(Cow::Borrowed(""), Value::match_text)
    }

    /// Number of variables set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every variable.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| {
                    let value: Value = value.into();
                    (name.into(), value.canonical())
                })
                .collect(),
        }
    }
}

impl IntoIterator for Variables {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
