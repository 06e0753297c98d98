//! Terms-suggestion compiler
//!
//! Builds the auto-suggest lookup over the terms index: a tokenized match on
//! the suggestion field, boosted by phrase and exact matches, restricted to a
//! set of term categories and rescaled by how often each term occurs.

use tracing::debug;

use super::ast::Clause;
use super::document::TermsQueryDocument;
use super::nodes::{
    BoolQuery, FunctionScoreQuery, MatchQuery, PhraseQuery, ScoreFunction, TermQuery,
};
use super::types::BoostMode;
use crate::config::TermsSettings;
use crate::models::{ParamValue, QueryParameters};
use crate::Result;

/// Compiles `term` / `term_type` parameters into a terms-suggestion query
#[derive(Clone, Debug, Default)]
pub struct TermsQueryBuilder {
    settings: TermsSettings,
}

impl TermsQueryBuilder {
    pub fn new(settings: TermsSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TermsSettings {
        &self.settings
    }

    /// Compile parameters into a terms query document
    pub fn compile(&self, params: &QueryParameters) -> Result<TermsQueryDocument> {
        let settings = &self.settings;
        let mut query = BoolQuery::new();

        if let Some(term) = params.scalar("term") {
            query = query
                .must(MatchQuery::new(settings.suggest_field.as_str(), &*term))
                .should(PhraseQuery::new(settings.suggest_field.as_str(), &*term))
                .should(MatchQuery::new(settings.exact_field.as_str(), &*term));
        }

        let term_types = params
            .get("term_type")
            .map(ParamValue::as_values)
            .unwrap_or_else(|| settings.default_term_types.clone());
        let filters: Vec<Clause> = term_types
            .iter()
            .filter(|term_type| !term_type.is_empty())
            .map(|term_type| {
                TermQuery::new(settings.term_type_field.as_str(), term_type.as_str()).into()
            })
            .collect();
        if !filters.is_empty() {
            query = query.filter(BoolQuery::any_of(filters));
        }

        let size = settings.page.clamp(params.unsigned("size")?);
        let from = params.unsigned("from")?.unwrap_or(0);

        let inner = if query.is_empty() {
            Clause::MatchAll
        } else {
            Clause::Bool(query)
        };
        let document = TermsQueryDocument {
            query: FunctionScoreQuery::new(inner)
                .function(ScoreFunction::field_value_factor(
                    settings.frequency_field.as_str(),
                    settings.frequency_factor,
                ))
                .with_boost_mode(BoostMode::Multiply),
            size,
            from,
        };

        debug!(size, from, "Compiled terms query: {}", document.to_json());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageLimits;
    use crate::error::QueryError;
    use serde_json::json;

    #[test]
    fn test_term_query_shape() {
        let params = QueryParameters::new().with("term", "api");
        let json = TermsQueryBuilder::default().compile(&params).unwrap().to_json();

        assert_eq!(
            json,
            json!({
                "query": {
                    "function_score": {
                        "query": {
                            "bool": {
                                "must": [{ "match": { "term_suggest": "api" } }],
                                "should": [
                                    { "match_phrase": { "term_suggest": { "query": "api" } } },
                                    { "match": { "term": "api" } }
                                ],
                                "filter": [{
                                    "bool": {
                                        "should": [
                                            { "term": { "term_type": "name" } },
                                            { "term": { "term_type": "agency.name" } },
                                            { "term": { "term_type": "agency.acronym" } },
                                            { "term": { "term_type": "tags" } },
                                            { "term": { "term_type": "languages" } }
                                        ],
                                        "minimum_should_match": 1
                                    }
                                }]
                            }
                        },
                        "functions": [
                            { "field_value_factor": { "field": "count_normalized", "factor": 0.25 } }
                        ],
                        "boost_mode": "multiply"
                    }
                },
                "size": 5,
                "from": 0
            })
        );
    }

    #[test]
    fn test_explicit_term_types() {
        let params = QueryParameters::new().with("term_type", "tags");
        let json = TermsQueryBuilder::default().compile(&params).unwrap().to_json();
        let inner = &json["query"]["function_score"]["query"]["bool"];

        assert!(inner.get("must").is_none());
        assert_eq!(
            inner["filter"][0]["bool"]["should"],
            json!([{ "term": { "term_type": "tags" } }])
        );
    }

    #[test]
    fn test_no_term_types_is_match_all() {
        let builder = TermsQueryBuilder::new(
            TermsSettings::default().with_default_term_types(Vec::<String>::new()),
        );
        let json = builder.compile(&QueryParameters::new()).unwrap().to_json();
        assert_eq!(
            json["query"]["function_score"]["query"],
            json!({ "match_all": {} })
        );
    }

    #[test]
    fn test_pagination_limits() {
        let builder = TermsQueryBuilder::default();
        let document = builder
            .compile(&QueryParameters::new().with("size", "50000"))
            .unwrap();
        assert_eq!(document.size, 100);

        let builder = TermsQueryBuilder::new(
            TermsSettings::default().with_page_limits(PageLimits::new(3, 20)),
        );
        let document = builder.compile(&QueryParameters::new()).unwrap();
        assert_eq!(document.size, 3);

        let err = builder
            .compile(&QueryParameters::new().with("size", "lots"))
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidParameter { ref name, .. } if name == "size"));
    }
}
