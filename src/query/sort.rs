//! Sort expressions
//!
//! A sort expression is a comma separated list of `field[__order][__mode]`
//! tokens, e.g. `name__desc__avg,agency.acronym`. Modifiers may come in any
//! order; a modifier that is neither a known order nor a known mode is ignored.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::ast::keyed;
use super::types::{SortMode, SortOrder};

const MODIFIER_SEPARATOR: &str = "__";

/// One entry of the `sort` array of a query document
#[derive(Clone, Debug, PartialEq)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
    pub mode: Option<SortMode>,
}

impl SortField {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
            mode: None,
        }
    }

    /// Sort by relevance, best first
    pub fn score() -> Self {
        Self::new("_score", SortOrder::Desc)
    }

    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Render as `{ "<field>": { "order": ..., "mode": ... } }`
    pub fn to_dsl(&self) -> Value {
        let mut spec = Map::new();
        spec.insert(
            "order".to_string(),
            serde_json::to_value(self.order).unwrap_or(Value::Null),
        );
        if let Some(mode) = self.mode {
            spec.insert(
                "mode".to_string(),
                serde_json::to_value(mode).unwrap_or(Value::Null),
            );
        }
        keyed(&self.field, Value::Object(spec))
    }
}

impl Serialize for SortField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dsl().serialize(serializer)
    }
}

/// Parsed user sort expression
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortSpec {
    pub fields: Vec<SortField>,
}

impl SortSpec {
    /// Parse a sort expression; never fails, unusable tokens are dropped
    pub fn parse(expression: &str) -> Self {
        let fields = expression
            .split(',')
            .filter_map(|token| Self::parse_token(token.trim()))
            .collect();
        Self { fields }
    }

    fn parse_token(token: &str) -> Option<SortField> {
        let mut parts = token.split(MODIFIER_SEPARATOR);
        let field = parts.next().map(str::trim).filter(|f| !f.is_empty())?;

        let mut sort = SortField::new(field, SortOrder::Asc);
        for modifier in parts.map(str::trim) {
            if let Some(order) = SortOrder::parse(modifier) {
                sort.order = order;
            }
            if let Some(mode) = SortMode::parse(modifier) {
                sort.mode = Some(mode);
            }
        }
        Some(sort)
    }

    /// Rewrite every field to one of its sub-fields, e.g. `name` → `name.keyword`
    pub fn on_subfield(mut self, subfield: &str) -> Self {
        if !subfield.is_empty() {
            for sort in &mut self.fields {
                sort.field = format!("{}.{}", sort.field, subfield);
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
