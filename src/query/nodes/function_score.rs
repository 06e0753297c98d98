//! Function score query - rescales the score of a wrapped query

use crate::query::ast::{Clause, QueryNode};
use crate::query::types::BoostMode;
use serde::Serialize;
use serde_json::{Map, Value};

/// Score function applied to every document the wrapped query matches
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFunction {
    /// Multiply a numeric document field by `factor`
    FieldValueFactor { field: String, factor: f64 },
}

impl ScoreFunction {
    /// Scale the score by a numeric field
    pub fn field_value_factor(field: impl Into<String>, factor: f64) -> Self {
        ScoreFunction::FieldValueFactor {
            field: field.into(),
            factor,
        }
    }
}

/// Query whose relevance score is modified by score functions
///
/// ```json
/// {
///   "function_score": {
///     "query": { "bool": { ... } },
///     "functions": [{ "field_value_factor": { "field": "count_normalized", "factor": 0.25 } }],
///     "boost_mode": "multiply"
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionScoreQuery {
    /// Query producing the base score
    pub query: Box<Clause>,
    /// Functions combined into the function score
    pub functions: Vec<ScoreFunction>,
    /// How the function score is combined with the base score
    pub boost_mode: BoostMode,
}

impl FunctionScoreQuery {
    /// Wrap a query with no functions and multiplicative boost mode
    pub fn new(query: impl Into<Clause>) -> Self {
        Self {
            query: Box::new(query.into()),
            functions: Vec::new(),
            boost_mode: BoostMode::default(),
        }
    }

    /// Add a score function
    pub fn function(mut self, function: ScoreFunction) -> Self {
        self.functions.push(function);
        self
    }

    /// Set the boost mode
    pub fn with_boost_mode(mut self, boost_mode: BoostMode) -> Self {
        self.boost_mode = boost_mode;
        self
    }
}

impl QueryNode for FunctionScoreQuery {
    fn query_type(&self) -> &'static str {
        "function_score"
    }

    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), self.query.to_dsl());
        body.insert(
            "functions".to_string(),
            serde_json::to_value(&self.functions).unwrap_or_else(|_| Value::Array(Vec::new())),
        );
        body.insert(
            "boost_mode".to_string(),
            serde_json::to_value(self.boost_mode).unwrap_or(Value::Null),
        );
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::MatchQuery;
    use serde_json::json;

    #[test]
    fn test_function_score_dsl() {
        let query = FunctionScoreQuery::new(MatchQuery::new("term_suggest", "api"))
            .function(ScoreFunction::field_value_factor("count_normalized", 0.25));

        assert_eq!(query.query_type(), "function_score");
        assert_eq!(
            query.to_dsl(),
            json!({
                "function_score": {
                    "query": { "match": { "term_suggest": "api" } },
                    "functions": [
                        { "field_value_factor": { "field": "count_normalized", "factor": 0.25 } }
                    ],
                    "boost_mode": "multiply"
                }
            })
        );
    }

    #[test]
    fn test_function_score_boost_mode() {
        let query = FunctionScoreQuery::new(Clause::MatchAll).with_boost_mode(BoostMode::Sum);
        let dsl = query.to_dsl();
        assert_eq!(dsl["function_score"]["boost_mode"], json!("sum"));
        assert_eq!(dsl["function_score"]["functions"], json!([]));
    }
}
