//! Runtime values checked by validators
//!
//! [`Value`] models arbitrary in-memory data. Maps keep insertion order and may
//! carry keys of any kind, so sparse sequences (`{0: "a", 2: "b"}`) and maps with
//! invalid keys can be represented and rejected by the composite validators.

use std::fmt;

// ============================================================================
// Value Enum
// ============================================================================

/// Runtime value that can be validated
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Int(i64),
    /// Float value (f64)
    Float(f64),
    /// String value
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Dense sequence, implicitly keyed `0..len`
    List(Vec<Value>),
    /// Ordered key-value pairs with keys of any kind
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Get human-readable type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Build a map from key-value pairs
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Number of entries of a list or map
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::List(items) => Some(items.len()),
            Self::Map(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    /// Iterate `(key, element)` pairs of a list or map, in storage order
    pub fn entries(&self) -> Option<Entries<'_>> {
        match self {
            Self::List(items) => Some(Entries::List(items.iter().enumerate())),
            Self::Map(pairs) => Some(Entries::Map(pairs.iter())),
            _ => None,
        }
    }

    /// Check whether a list or map has an entry named `name`
    ///
    /// Integer keys (and list indices) match their decimal rendering.
    pub fn contains_key(&self, name: &str) -> bool {
        match self {
            Self::List(items) => name
                .parse::<usize>()
                .map(|idx| idx < items.len() && idx.to_string() == name)
                .unwrap_or(false),
            Self::Map(pairs) => pairs
                .iter()
                .any(|(k, _)| Key::from_value(k).name().as_deref() == Some(name)),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Self::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Classified view of a list index or map key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key<'a> {
    /// Integer key or list index
    Int(i64),
    /// String key
    Str(&'a str),
    /// Anything else (float, bool, null, nested value), never a valid key
    Other(&'a Value),
}

impl<'a> Key<'a> {
    /// Classify a map key
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Int(i) => Self::Int(*i),
            Value::String(s) => Self::Str(s),
            other => Self::Other(other),
        }
    }

    /// Name used for rule lookup and error messages, `None` for invalid keys
    pub fn name(&self) -> Option<String> {
        match self {
            Self::Int(i) => Some(i.to_string()),
            Self::Str(s) => Some((*s).to_string()),
            Self::Other(_) => None,
        }
    }

    /// Rendering for messages, valid or not
    pub fn describe(&self) -> String {
        match self {
            Self::Other(v) => v.to_string(),
            _ => self.name().unwrap_or_default(),
        }
    }
}

/// Iterator over the entries of a list or map, see [`Value::entries`]
pub enum Entries<'a> {
    List(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
    Map(std::slice::Iter<'a, (Value, Value)>),
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Key<'a>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::List(it) => it.next().map(|(i, v)| (Key::Int(i as i64), v)),
            Self::Map(it) => it.next().map(|(k, v)| (Key::from_value(k), v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::List(it) => it.size_hint(),
            Self::Map(it) => it.size_hint(),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => number_to_value(n.as_i64(), n.as_f64()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Self::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (Self::String(k), v.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => number_to_value(n.as_i64(), n.as_f64()),
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(items) => {
                Self::List(items.into_iter().map(Into::into).collect())
            }
            // YAML keeps non-string keys, so `{0: a, 2: b}` stays integer-keyed
            serde_yaml::Value::Mapping(mapping) => Self::Map(
                mapping
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => tagged.value.into(),
        }
    }
}

fn number_to_value(as_int: Option<i64>, as_float: Option<f64>) -> Value {
    match (as_int, as_float) {
        (Some(i), _) => Value::Int(i),
        (None, Some(x)) => Value::Float(x),
        (None, None) => Value::Null,
    }
}
