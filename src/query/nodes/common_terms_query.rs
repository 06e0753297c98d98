//! Common terms query - splits the text into rare and frequent terms

use crate::query::ast::{insert_boost, QueryNode};
use crate::query::types::MatchOperator;
use serde_json::{Map, Value};

/// Terms occurring in more than this fraction of documents count as common
pub const DEFAULT_CUTOFF_FREQUENCY: f64 = 0.001;

/// Query that scores rare terms first and only uses frequent terms to refine
///
/// Rare (low frequency) terms are combined with `low_freq_operator`, so with the
/// default `and` every rare term of the text must be present.
#[derive(Clone, Debug, PartialEq)]
pub struct CommonTermsQuery {
    /// Field to search in
    pub field: String,
    /// Text to search for (will be analyzed)
    pub text: String,
    /// Document-frequency threshold between rare and common terms
    pub cutoff_frequency: f64,
    /// How rare terms are combined
    pub low_freq_operator: MatchOperator,
    /// Boost factor for scoring
    pub boost: Option<f64>,
}

impl CommonTermsQuery {
    /// Create a new common terms query with the default cutoff
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            cutoff_frequency: DEFAULT_CUTOFF_FREQUENCY,
            low_freq_operator: MatchOperator::And,
            boost: None,
        }
    }

    /// Set the cutoff frequency
    pub fn with_cutoff_frequency(mut self, cutoff_frequency: f64) -> Self {
        self.cutoff_frequency = cutoff_frequency;
        self
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

impl QueryNode for CommonTermsQuery {
    fn query_type(&self) -> &'static str {
        "common"
    }

    fn body(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("query".to_string(), Value::String(self.text.clone()));
        spec.insert(
            "cutoff_frequency".to_string(),
            Value::from(self.cutoff_frequency),
        );
        spec.insert(
            "low_freq_operator".to_string(),
            Value::from(self.low_freq_operator.as_str()),
        );
        insert_boost(&mut spec, self.boost);

        let mut body = Map::with_capacity(1);
        body.insert(self.field.clone(), Value::Object(spec));
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_common_terms_defaults() {
        let query = CommonTermsQuery::new("description", "the data api");
        assert_eq!(query.cutoff_frequency, 0.001);
        assert_eq!(query.low_freq_operator, MatchOperator::And);
        assert_eq!(
            query.to_dsl(),
            json!({
                "common": {
                    "description": {
                        "query": "the data api",
                        "cutoff_frequency": 0.001,
                        "low_freq_operator": "and"
                    }
                }
            })
        );
    }

    #[test]
    fn test_common_terms_with_boost() {
        let query = CommonTermsQuery::new("name", "data api")
            .with_cutoff_frequency(0.01)
            .with_boost(4.0);
        let dsl = query.to_dsl();
        assert_eq!(dsl["common"]["name"]["boost"], json!(4.0));
        assert_eq!(dsl["common"]["name"]["cutoff_frequency"], json!(0.01));
    }
}
