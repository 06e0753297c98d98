//! Multi-match query - one text against several weighted fields

use crate::query::ast::QueryNode;
use crate::query::types::{FieldBoost, MultiMatchType};
use serde_json::{Map, Value};

/// Query that matches the same text against several fields at once
///
/// With the default `best_fields` type the best scoring field determines the
/// document score instead of the sum over all fields.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiMatchQuery {
    /// Text to search for (will be analyzed per field)
    pub text: String,
    /// Fields and their boosts
    pub fields: Vec<FieldBoost>,
    /// How per-field scores are combined
    pub match_type: MultiMatchType,
}

impl MultiMatchQuery {
    /// Create a new best-fields multi-match query
    pub fn new(text: impl Into<String>, fields: Vec<FieldBoost>) -> Self {
        Self {
            text: text.into(),
            fields,
            match_type: MultiMatchType::BestFields,
        }
    }

    /// Set how per-field scores are combined
    pub fn with_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = match_type;
        self
    }
}

impl QueryNode for MultiMatchQuery {
    fn query_type(&self) -> &'static str {
        "multi_match"
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(self.text.clone()));
        body.insert(
            "fields".to_string(),
            Value::Array(
                self.fields
                    .iter()
                    .map(|field| Value::String(field.to_string()))
                    .collect(),
            ),
        );
        body.insert(
            "type".to_string(),
            serde_json::to_value(self.match_type).unwrap_or(Value::Null),
        );
        Value::Object(body)
    }
}
