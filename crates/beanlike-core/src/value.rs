//! Property values — the dynamic currency of every check
//!
//! Checks never know the concrete Rust type of a property. Expected values,
//! constructor arguments and accessor results all travel as [`Value`]s and
//! are compared structurally, so `Null == Null` and arrays compare element
//! by element.
//!
//! [`PropertyValue`] converts between a Rust type and a [`Value`]; every
//! parameter and return type used in a descriptor must implement it.

use std::collections::{BTreeMap, BTreeSet};

// ── Value ─────────────────────────────────────────────────

/// A dynamically typed property value
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null / absent
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value (i64)
    Integer(i64),
    /// Unsigned integer above `i64::MAX`; smaller ones are always `Integer`
    Unsigned(u64),
    /// Float value (f64)
    Float(f64),
    /// String value
    String(String),
    /// Array or list of values
    Array(Vec<Value>),
    /// Ordered map (BTreeMap for deterministic iteration)
    Object(BTreeMap<String, Value>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Unsigned(u) => write!(f, "{}", u),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Value::Unsigned(u), Value::Integer)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

// ── PropertyValue ─────────────────────────────────────────

/// Conversion between a Rust type and a [`Value`].
///
/// `from_value` returns `None` when the value has the wrong shape, e.g. a
/// `Null` passed where an `i32` is expected.
pub trait PropertyValue: Sized + 'static {
    fn into_value(self) -> Value;
    fn from_value(value: &Value) -> Option<Self>;
}

impl PropertyValue for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

/// Unit stands for "no value"; only invalid accessors and valid mutators return it.
impl PropertyValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.is_null().then_some(())
    }
}

impl PropertyValue for bool {
    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! integer_property_value {
    ($($ty:ty),+) => {$(
        impl PropertyValue for $ty {
            fn into_value(self) -> Value {
                match i64::try_from(self) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => u64::try_from(self).map_or(Value::Null, Value::Unsigned),
                }
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::Integer(i) => <$ty>::try_from(*i).ok(),
                    Value::Unsigned(u) => <$ty>::try_from(*u).ok(),
                    _ => None,
                }
            }
        }
    )+};
}

integer_property_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl PropertyValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::Unsigned(u) => Some(*u as f64),
            _ => None,
        }
    }
}

impl PropertyValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, PropertyValue::into_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: PropertyValue> PropertyValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(PropertyValue::into_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: PropertyValue> PropertyValue for BTreeMap<String, T> {
    fn into_value(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(k, v)| (k, v.into_value()))
                .collect(),
        )
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            _ => None,
        }
    }
}

// ── PropertyMap ───────────────────────────────────────────

static NULL: Value = Value::Null;

/// Property names mapped to values.
///
/// Reading a name that is not present yields `Null`, so a map only has to
/// list the properties a check actually needs.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, Value>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Insert a value, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Value for `name`, or `Null` when absent
    pub fn get(&self, name: &str) -> &Value {
        self.entries.get(name).unwrap_or(&NULL)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn key_set(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON object of property names to values
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
