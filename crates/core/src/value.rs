//! Semantic value tree.
//!
//! Temporal values carry their textual payload verbatim. A `Time` value
//! never says whether its text includes an offset; only the schema
//! position ([`crate::AirbyteType`]) knows that.

use rust_decimal::Decimal;
use std::fmt;

// ──────────────────────────────────────────────
// Value
// ──────────────────────────────────────────────

/// One node of a record's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Arbitrary-precision number. Never `f64`, so fixture values compare
    /// exactly.
    Number(Decimal),
    String(String),
    Date(String),
    Time(String),
    Timestamp(String),
    Array(Vec<Value>),
    Object(ObjectValue),
}

impl Value {
    /// Returns a human-readable variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::Timestamp(_) => "Timestamp",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Textual payload of a Date, Time or Timestamp value.
    pub fn temporal_text(&self) -> Option<&str> {
        match self {
            Value::Date(s) | Value::Time(s) | Value::Timestamp(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_temporal(&self) -> bool {
        self.temporal_text().is_some()
    }
}

impl From<ObjectValue> for Value {
    fn from(obj: ObjectValue) -> Self {
        Value::Object(obj)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Date(s) => write!(f, "Date({:?})", s),
            Value::Time(s) => write!(f, "Time({:?})", s),
            Value::Timestamp(s) => write!(f, "Timestamp({:?})", s),
            Value::Array(items) => write!(f, "Array[{}]", items.len()),
            Value::Object(obj) => write!(f, "Object{{{}}}", obj.len()),
        }
    }
}

// ──────────────────────────────────────────────
// ObjectValue
// ──────────────────────────────────────────────

/// Ordered string-keyed mapping. Keys are unique; insertion order is
/// kept so a mapped record re-serializes with the fixture's field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectValue {
    entries: Vec<(String, Value)>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a field. An existing key keeps its position and has its
    /// value replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut obj = ObjectValue::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl IntoIterator for ObjectValue {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
