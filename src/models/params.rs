//! Raw search parameters and their coercions
//!
//! Parameters arrive either as a decoded query string (every value a string,
//! repeated keys forming a list) or as a JSON body (numbers and nested values
//! possible). Both are normalized into `QueryParameters`; the compilers then
//! read them through the typed accessors below, which decide how each shape is
//! coerced.

use crate::error::QueryError;
use crate::Result;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A single parameter value
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Single string value
    Text(String),
    /// Repeated or array value
    List(Vec<String>),
    /// Any other JSON value (number, boolean, object)
    Other(Value),
}

impl ParamValue {
    /// Whether the value counts as supplied
    ///
    /// Empty strings are treated like absent parameters, as an empty query
    /// string value (`?q=`) carries no input.
    pub fn is_present(&self) -> bool {
        match self {
            ParamValue::Text(s) => !s.is_empty(),
            ParamValue::List(_) => true,
            ParamValue::Other(v) => !v.is_null(),
        }
    }

    /// The value as a single string, if it has a scalar form
    ///
    /// Lists yield their first non-empty entry.
    pub fn as_scalar(&self) -> Option<Cow<'_, str>> {
        match self {
            ParamValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            ParamValue::List(items) => items
                .iter()
                .find(|item| !item.is_empty())
                .map(|item| Cow::Borrowed(item.as_str())),
            ParamValue::Other(v) => scalar_to_string(v).map(Cow::Owned),
        }
    }

    /// The value as a list of strings, for parameters accepting several values
    pub fn as_values(&self) -> Vec<String> {
        match self {
            ParamValue::Text(s) => vec![s.clone()],
            ParamValue::List(items) => items.clone(),
            ParamValue::Other(v) => scalar_to_string(v).into_iter().collect(),
        }
    }

    /// Coerce into a list: strings become one-element lists, lists are kept
    /// and anything else becomes an empty list
    pub fn enforce_list(&self) -> Vec<String> {
        match self {
            ParamValue::Text(s) => vec![s.clone()],
            ParamValue::List(items) => items.clone(),
            ParamValue::Other(_) => Vec::new(),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(ParamValue::Text(s.clone())),
            Value::Array(items) => Some(ParamValue::List(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            other => Some(ParamValue::Other(other.clone())),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a decimal integer; digit strings past `u64::MAX` saturate
fn parse_unsigned(raw: &str) -> Option<u64> {
    match raw.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => Some(u64::MAX),
        Err(_) => None,
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Other(Value::from(value))
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::from_json(&value).unwrap_or(ParamValue::Other(Value::Null))
    }
}

/// Ordered mapping of raw parameter names to values
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParameters {
    values: BTreeMap<String, ParamValue>,
}

impl QueryParameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Build parameters from a JSON object body
    ///
    /// `null` values are dropped; arrays keep their scalar entries as strings.
    pub fn from_json(body: &Value) -> Result<Self> {
        let map = body.as_object().ok_or_else(|| {
            QueryError::invalid_parameter("body", "parameters must be a JSON object")
        })?;

        let values = map
            .iter()
            .filter_map(|(name, value)| {
                ParamValue::from_json(value).map(|value| (name.clone(), value))
            })
            .collect();
        Ok(Self { values })
    }

    /// Build parameters from decoded `key=value` pairs
    ///
    /// Repeated keys, and keys written with a trailing `[]`, collect into a list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values: BTreeMap<String, ParamValue> = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let (name, force_list) = match key.strip_suffix("[]") {
                Some(name) => (name, true),
                None => (key, false),
            };
            let value = value.into();

            let merged = match values.remove(name) {
                None if force_list => ParamValue::List(vec![value]),
                None => ParamValue::Text(value),
                Some(ParamValue::Text(first)) => ParamValue::List(vec![first, value]),
                Some(ParamValue::List(mut items)) => {
                    items.push(value);
                    ParamValue::List(items)
                }
                Some(ParamValue::Other(_)) => ParamValue::Text(value),
            };
            values.insert(name.to_string(), merged);
        }
        Self { values }
    }

    /// Get a supplied parameter; empty values count as absent
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name).filter(|value| value.is_present())
    }

    /// Whether a parameter was supplied
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get a parameter as a single non-empty string
    pub fn scalar(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name)
            .and_then(ParamValue::as_scalar)
            .filter(|value| !value.is_empty())
    }

    /// Get a parameter as a non-negative integer
    ///
    /// Absent parameters yield `None`; anything that is not a non-negative
    /// whole number is rejected.
    pub fn unsigned(&self, name: &str) -> Result<Option<u64>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        let parsed = match value {
            ParamValue::Other(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            }),
            other => other.as_scalar().and_then(|s| parse_unsigned(s.trim())),
        };

        parsed.map(Some).ok_or_else(|| {
            QueryError::invalid_parameter(name, "expected a non-negative integer")
        })
    }

    /// Get a parameter coerced into a list, `None` when absent
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.get(name).map(ParamValue::enforce_list)
    }

    /// Iterate over all supplied parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values
            .iter()
            .filter(|(_, value)| value.is_present())
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
