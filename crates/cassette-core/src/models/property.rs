//! Closed scalar property model.
//!
//! Event properties never carry arrays or objects; anything that cannot be
//! expressed as a [`PropertyValue`] is dropped at the boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered property map attached to an event.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A single scalar property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// JavaScript-style truthiness: `true`, non-zero numbers, non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Convert a JSON value. Arrays and objects have no representation.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Number)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u64> for PropertyValue {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(Self::Integer)
            .unwrap_or(Self::Number(v as f64))
    }
}

impl From<usize> for PropertyValue {
    fn from(v: usize) -> Self {
        Self::from(v as u64)
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for PropertyValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Build [`Properties`] from a JSON object. Non-object input yields an empty
/// map; nested arrays and objects are skipped.
pub fn properties_from_json(value: &serde_json::Value) -> Properties {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| PropertyValue::from_json(v).map(|pv| (k.clone(), pv)))
                .collect()
        })
        .unwrap_or_default()
}

/// Build a [`Properties`] map.
///
/// ```
/// use cassette_core::properties;
/// let props = properties! { "route" => "/post/1", "success" => true };
/// assert_eq!(props.len(), 2);
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::models::Properties::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::models::Properties::new();
        $(
            props.insert(
                ::std::string::String::from($key),
                $crate::models::PropertyValue::from($value),
            );
        )+
        props
    }};
}
