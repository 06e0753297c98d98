//! Entity search compiler
//!
//! Turns raw search parameters into a [`QueryDocument`]:
//!
//! - `q` becomes a weighted `multi_match` in `must`
//! - every keyword field with a matching parameter becomes a `term` filter,
//!   several values of one field being OR-ed in a nested `bool`
//! - every date field takes `<field>_gte` / `<field>_lte` range bounds
//! - `size` / `from` page the results, `sort` orders them after relevance
//! - `include` / `exclude` project `_source`

use std::sync::Arc;

use tracing::debug;

use super::ast::Clause;
use super::dates::normalize_date_bound;
use super::document::{QueryDocument, SourceFilter};
use super::nodes::{
    BoolQuery, CommonTermsQuery, MatchQuery, MultiMatchQuery, PhraseQuery, RangeQuery, TermQuery,
};
use super::sort::{SortField, SortSpec};
use super::types::{MultiMatchType, SortOrder};
use crate::config::EntitySearchSettings;
use crate::models::{ParamValue, QueryParameters};
use crate::schema::{FieldType, FieldTypeRegistry};
use crate::Result;

/// Phrase match, optionally boosted
pub fn phrase_match_clause(
    field: impl Into<String>,
    text: impl Into<String>,
    boost: Option<f64>,
) -> Clause {
    let mut query = PhraseQuery::new(field, text);
    query.boost = boost;
    query.into()
}

/// Plain analyzed match
pub fn match_clause(field: impl Into<String>, text: impl Into<String>) -> Clause {
    MatchQuery::new(field, text).into()
}

/// Common-terms match with the default cutoff frequency, optionally boosted
pub fn common_cutoff_clause(
    field: impl Into<String>,
    text: impl Into<String>,
    boost: Option<f64>,
) -> Clause {
    let mut query = CommonTermsQuery::new(field, text);
    query.boost = boost;
    query.into()
}

/// One alternative way of matching free text against a field
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FullTextClause {
    Phrase { boost: Option<f64> },
    Match,
    CommonTerms { boost: Option<f64> },
}

/// A set of full-text clauses OR-ed together in a `should` list
#[derive(Clone, Debug, PartialEq)]
pub struct FullTextStrategy {
    field: String,
    clauses: Vec<FullTextClause>,
}

impl FullTextStrategy {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            clauses: Vec::new(),
        }
    }

    pub fn with(mut self, clause: FullTextClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render every configured clause for `text`
    pub fn clauses(&self, text: &str) -> Vec<Clause> {
        self.clauses
            .iter()
            .map(|clause| match *clause {
                FullTextClause::Phrase { boost } => phrase_match_clause(&self.field, text, boost),
                FullTextClause::Match => match_clause(&self.field, text),
                FullTextClause::CommonTerms { boost } => {
                    common_cutoff_clause(&self.field, text, boost)
                }
            })
            .collect()
    }

    /// Push the clauses into the `should` list of an existing query
    pub fn apply(&self, query: BoolQuery, text: &str) -> BoolQuery {
        self.clauses(text)
            .into_iter()
            .fold(query, |query, clause| query.should(clause))
    }

    /// A standalone should-only query
    pub fn build(&self, text: &str) -> BoolQuery {
        self.apply(BoolQuery::new(), text)
    }
}

/// Compiles entity search parameters against a field-type registry
#[derive(Clone, Debug)]
pub struct SearchQueryBuilder {
    registry: Arc<FieldTypeRegistry>,
    settings: EntitySearchSettings,
}

impl SearchQueryBuilder {
    pub fn new(registry: Arc<FieldTypeRegistry>, settings: EntitySearchSettings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &EntitySearchSettings {
        &self.settings
    }

    /// Compile parameters into a query document
    ///
    /// Fails on an unparseable date bound or a malformed `size` / `from`;
    /// every other malformed input is coerced or skipped.
    pub fn compile(&self, params: &QueryParameters) -> Result<QueryDocument> {
        let mut query = self.add_full_text(BoolQuery::new(), params);
        query = self.add_keyword_filters(query, params);
        query = self.add_date_filters(query, params)?;

        let size = self.settings.page.clamp(params.unsigned("size")?);
        let from = params.unsigned("from")?.unwrap_or(0);

        let clause_count = query.clause_count();
        let query = if query.is_empty() {
            Clause::MatchAll
        } else {
            Clause::Bool(query)
        };

        let document = QueryDocument {
            query,
            size,
            from,
            sort: self.sort(params),
            source: source_filter(params),
        };

        debug!(
            size,
            from,
            clauses = clause_count,
            sort_fields = document.sort.len(),
            "Compiled entity search query: {}",
            document.to_json()
        );
        Ok(document)
    }

    fn add_full_text(&self, query: BoolQuery, params: &QueryParameters) -> BoolQuery {
        match params.scalar("q") {
            Some(text) => query.must(
                MultiMatchQuery::new(text, self.settings.full_text_fields.clone())
                    .with_type(MultiMatchType::BestFields),
            ),
            None => query,
        }
    }

    fn add_keyword_filters(&self, mut query: BoolQuery, params: &QueryParameters) -> BoolQuery {
        for field in self.registry.fields_of_type(FieldType::Keyword) {
            let Some(value) = params.get(field) else {
                continue;
            };
            let path = self.registry.exact_match_path(field);

            match value {
                ParamValue::List(values) => {
                    let terms: Vec<Clause> = values
                        .iter()
                        .filter(|value| !value.is_empty())
                        .map(|value| TermQuery::new(path, value.to_lowercase()).into())
                        .collect();
                    if !terms.is_empty() {
                        query = query.filter(BoolQuery::any_of(terms));
                    }
                }
                scalar => {
                    if let Some(value) = scalar.as_scalar() {
                        query = query.filter(TermQuery::new(path, value.to_lowercase()));
                    }
                }
            }
        }
        query
    }

    fn add_date_filters(&self, mut query: BoolQuery, params: &QueryParameters) -> Result<BoolQuery> {
        for field in self.registry.fields_of_type(FieldType::Date) {
            let mut range = RangeQuery::new(field.as_str());

            if let Some(raw) = params.scalar(&format!("{}_lte", field)) {
                range = range.lte(normalize_date_bound(field, "lte", &raw)?);
            }
            if let Some(raw) = params.scalar(&format!("{}_gte", field)) {
                range = range.gte(normalize_date_bound(field, "gte", &raw)?);
            }

            if !range.bounds.is_empty() {
                query = query.filter(range);
            }
        }
        Ok(query)
    }

    fn sort(&self, params: &QueryParameters) -> Vec<SortField> {
        let mut sort = vec![SortField::score()];
        if !self.settings.tie_break_field.is_empty() {
            sort.push(SortField::new(
                self.settings.tie_break_field.as_str(),
                SortOrder::Desc,
            ));
        }

        if let Some(value) = params.get("sort") {
            let expression = value.as_values().join(",");
            sort.extend(
                SortSpec::parse(&expression)
                    .on_subfield(&self.settings.sort_subfield)
                    .fields,
            );
        }
        sort
    }
}

fn source_filter(params: &QueryParameters) -> Option<SourceFilter> {
    let include = params.list("include").unwrap_or_default();
    let exclude = params.list("exclude").unwrap_or_default();
    SourceFilter::new(include, exclude)
}
