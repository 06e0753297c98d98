//! Search response sanitizer
//!
//! Extracts result records from a raw search-engine response and strips the
//! engine's private bookkeeping keys (`_id`, `_score`, `_raw`, ...) from them.
//! The response is only ever borrowed; every result is a fresh value.

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::SearchSettings;

/// Default prefix marking private keys
pub const PRIVATE_PREFIX: char = '_';

/// Total hit count, reading both `"total": n` and `"total": { "value": n }`
pub fn total_hits(response: &Value) -> Option<u64> {
    match response.get("hits")?.get("total")? {
        Value::Number(n) => n.as_u64(),
        Value::Object(total) => total.get("value").and_then(Value::as_u64),
        _ => None,
    }
}

/// Copy of `value` without keys starting with `_`, at any depth
pub fn omit_private_keys(value: &Value) -> Value {
    ResponseSanitizer::default().omit_private_keys(value)
}

/// First hit's cleaned `_source`, or `{}` when nothing matched
pub fn parse_response(response: &Value) -> Value {
    ResponseSanitizer::default().parse_response(response)
}

/// Every hit's cleaned `_source`, in response order
pub fn sanitize_hits(response: &Value) -> Vec<Value> {
    ResponseSanitizer::default().sanitize_hits(response)
}

/// Response sanitizer with a configurable private-key prefix
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseSanitizer {
    private_prefix: char,
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::new(PRIVATE_PREFIX)
    }
}

impl From<&SearchSettings> for ResponseSanitizer {
    fn from(settings: &SearchSettings) -> Self {
        Self::new(settings.private_prefix)
    }
}

impl ResponseSanitizer {
    pub fn new(private_prefix: char) -> Self {
        Self { private_prefix }
    }

    pub fn private_prefix(&self) -> char {
        self.private_prefix
    }

    /// Copy of `value` with private keys removed from every object, including
    /// objects nested in arrays
    pub fn omit_private_keys(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(key, _)| !key.starts_with(self.private_prefix))
                    .map(|(key, value)| (key.clone(), self.omit_private_keys(value)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.omit_private_keys(item)).collect())
            }
            other => other.clone(),
        }
    }

    /// First hit's cleaned `_source`
    ///
    /// Responses without hits, or with a total of zero, yield an empty object.
    pub fn parse_response(&self, response: &Value) -> Value {
        let first = Self::hits(response).and_then(|hits| hits.first());
        match first {
            Some(hit) if total_hits(response) != Some(0) => self.clean_source(hit),
            _ => {
                debug!("Search returned no hits");
                Value::Object(Map::new())
            }
        }
    }

    /// Every hit's cleaned `_source`
    pub fn sanitize_hits(&self, response: &Value) -> Vec<Value> {
        Self::hits(response)
            .map(|hits| hits.iter().map(|hit| self.clean_source(hit)).collect())
            .unwrap_or_default()
    }

    fn hits(response: &Value) -> Option<&Vec<Value>> {
        response.get("hits")?.get("hits")?.as_array()
    }

    fn clean_source(&self, hit: &Value) -> Value {
        match hit.get("_source") {
            Some(source) => self.omit_private_keys(source),
            None => Value::Object(Map::new()),
        }
    }
}
